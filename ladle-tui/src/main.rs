//! Terminal UI for ladle that lets kitchen staff browse the day's count
//! report, meal labels, and delivery route sheets.

mod app;
mod input;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ladle_core::{
    model::{
        AssignedComponent, ClientId, ComponentGroup, ComponentId, DeliveryItem, DeliveryRecord,
        MealOrder, MealSize, RouteId,
    },
    ports::{IngredientLookup, OrderSource, SequenceStore},
    service::LadleService,
};
use ladle_store_memory::{MemoryStore, canonical_group_rank};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // Store + service setup
    let store = Arc::new(MemoryStore::new());
    let date = Local::now().date_naive();
    seed_demo_day(&store, date);

    // Drivers reordered the first route on a previous day
    store
        .set(
            RouteId(1),
            date,
            vec![ClientId(8), ClientId(2), ClientId(1)],
        )
        .await?;

    let orders: Arc<dyn OrderSource> = Arc::<MemoryStore>::clone(&store);
    let ingredients: Arc<dyn IngredientLookup> = Arc::<MemoryStore>::clone(&store);
    let sequences: Arc<dyn SequenceStore> = Arc::<MemoryStore>::clone(&store);
    let service = Arc::new(LadleService::new(
        orders,
        ingredients,
        sequences,
        Arc::new(canonical_group_rank),
    ));

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::LoadKitchenReport => {
                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.kitchen_report(app.date).await;

                    app.is_loading = false;
                    match res {
                        Ok(report) => app.kitchen = Some(report),
                        Err(err) => {
                            app.error_message =
                                Some(format!("Failed to build kitchen count: {err}"));
                        }
                    }
                }
                Action::LoadLabelSheet => {
                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.label_sheet(app.date).await;

                    app.is_loading = false;
                    match res {
                        Ok(sheet) => app.labels = Some(sheet),
                        Err(err) => {
                            app.error_message = Some(format!("Failed to lay out labels: {err}"));
                        }
                    }
                }
                Action::LoadRoutes => {
                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.routes().await;

                    app.is_loading = false;
                    match res {
                        Ok(routes) => {
                            app.routes = routes;
                            app.route_index = 0;
                        }
                        Err(err) => {
                            app.error_message = Some(format!("Failed to list routes: {err}"));
                        }
                    }
                }
                Action::LoadRouteSheetForCurrentRoute => {
                    let Some(route) = app.select_current_route() else {
                        app.error_message = Some("No route selected".into());
                        continue;
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.route_sheet(route, app.date).await;

                    app.is_loading = false;
                    match res {
                        Ok(sheet) => app.sheet = Some(sheet),
                        Err(err) => {
                            app.sheet = None;
                            app.error_message =
                                Some(format!("Failed to build route sheet: {err}"));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

const MAIN_DISH: ComponentId = ComponentId(10);
const DESSERT: ComponentId = ComponentId(20);
const SIDES: ComponentId = ComponentId(30);

/// Seed the store with a small but representative delivery day: two routes
/// and clients covering every conflict partition.
fn seed_demo_day(store: &MemoryStore, date: NaiveDate) {
    store.insert_route(RouteId(1), "Plateau Mont-Royal");
    store.insert_route(RouteId(2), "Centre-Sud");

    store.insert_ingredients(
        MAIN_DISH,
        date,
        vec!["ground beef".into(), "potato".into(), "corn".into()],
    );
    store.insert_ingredients(DESSERT, date, vec!["rice".into(), "milk".into()]);
    store.insert_ingredients(SIDES, date, vec!["green beans".into()]);

    let mut orders = vec![
        demo_order(1, "Arsenault", "Paul", MealSize::Regular, 2, RouteId(1)),
        demo_order(2, "Belanger", "Lise", MealSize::Large, 1, RouteId(1)),
        demo_order(3, "Cyr", "Eve", MealSize::Regular, 1, RouteId(2)),
        demo_order(4, "Dion", "Luc", MealSize::Regular, 1, RouteId(1)),
        demo_order(5, "Fortin", "Mia", MealSize::Large, 1, RouteId(2)),
        demo_order(6, "Gagnon", "Leo", MealSize::Regular, 1, RouteId(1)),
        demo_order(7, "Hebert", "Ana", MealSize::Regular, 1, RouteId(2)),
        demo_order(8, "Roy", "Jean", MealSize::Regular, 3, RouteId(1)),
    ];
    if let Some(order) = orders.get_mut(1) {
        order.incompatible_components = vec!["Tofu".into()];
    }
    if let Some(order) = orders.get_mut(2) {
        order.incompatible_ingredients = vec!["nuts".into()];
    }
    if let Some(order) = orders.get_mut(3) {
        order.incompatible_ingredients = vec!["nuts".into()];
    }
    if let Some(order) = orders.get_mut(4) {
        order.incompatible_ingredients = vec!["shellfish".into()];
    }
    if let Some(order) = orders.get_mut(5) {
        order.preparation = vec!["cut up".into(), "puree".into()];
    }
    if let Some(order) = orders.get_mut(6) {
        order.restricted_items = vec!["salt".into()];
    }

    for order in &orders {
        let stop = demo_stop(order);
        store.insert_deliveries(date, order.route, vec![stop]);
    }
    store.insert_orders(date, orders);
}

fn demo_order(
    id: u32,
    lastname: &str,
    firstname: &str,
    size: MealSize,
    qty: u32,
    route: RouteId,
) -> MealOrder {
    let route_name = if route == RouteId(1) {
        "Plateau Mont-Royal"
    } else {
        "Centre-Sud"
    };
    MealOrder {
        client: ClientId(id),
        lastname: lastname.to_owned(),
        firstname: firstname.to_owned(),
        size,
        qty,
        components: vec![
            AssignedComponent {
                group: ComponentGroup::MainDish,
                component: MAIN_DISH,
                name: "Shepherd's pie".to_owned(),
                qty,
            },
            AssignedComponent {
                group: ComponentGroup::Dessert,
                component: DESSERT,
                name: "Rice pudding".to_owned(),
                qty,
            },
            AssignedComponent {
                group: ComponentGroup::Sides,
                component: SIDES,
                name: "Green beans".to_owned(),
                qty,
            },
        ],
        incompatible_components: Vec::new(),
        incompatible_ingredients: Vec::new(),
        preparation: Vec::new(),
        other_components: Vec::new(),
        other_ingredients: Vec::new(),
        restricted_items: Vec::new(),
        route,
        route_name: route_name.to_owned(),
    }
}

fn demo_stop(order: &MealOrder) -> DeliveryRecord {
    let items = order
        .components
        .iter()
        .map(|assigned| DeliveryItem {
            group: Some(assigned.group.clone()),
            size: order.size,
            total_quantity: assigned.qty,
        })
        .collect();
    DeliveryRecord {
        client: order.client,
        lastname: order.lastname.clone(),
        firstname: order.firstname.clone(),
        street: format!("{} Rue Saint-Hubert", 4400 + order.client.0 * 2),
        delivery_items: items,
    }
}
