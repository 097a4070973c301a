use std::sync::Arc;

use chrono::{Local, NaiveDate};
use ladle_core::{
    labels::LabelSheet,
    model::RouteId,
    service::{KitchenReport, LadleService, RouteSheet},
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    Home,
    KitchenCount,
    Labels,
    RouteSelect,
    RouteSheet,
}

pub(crate) const HOME_ENTRIES: [&str; 3] =
    ["Kitchen count report", "Meal labels", "Delivery routes"];

pub(crate) struct App {
    pub service: Arc<LadleService>,
    pub date: NaiveDate,

    pub screen: Screen,
    pub home_index: usize,

    pub kitchen: Option<KitchenReport>,
    pub labels: Option<LabelSheet>,

    pub routes: Vec<(RouteId, String)>,
    pub route_index: usize,
    pub selected_route: Option<(RouteId, String)>,
    pub sheet: Option<RouteSheet>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<LadleService>) -> Self {
        Self {
            service,
            date: Local::now().date_naive(),
            screen: Screen::Home,
            home_index: 0,
            kitchen: None,
            labels: None,
            routes: Vec::new(),
            route_index: 0,
            selected_route: None,
            sheet: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn select_current_route(&mut self) -> Option<RouteId> {
        let (id, name) = self.routes.get(self.route_index)?.clone();
        self.selected_route = Some((id, name));
        self.screen = Screen::RouteSheet;
        Some(id)
    }
}
