//! High-level service facade combining the collaborator ports with the
//! pure report builders.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::kitchen::{self, ComponentLine, MealLine, ReportOptions};
use crate::labels::{self, LabelSheet, SheetGeometry};
use crate::model::{ClientId, ComponentId, DeliveryRecord, MealOrder, RouteId};
use crate::ports::{
    GroupOrdering, IngredientLookup, OrderSource, PortError, ReportError, SequenceStore,
};
use crate::route::{self, RouteSummaryLine};

#[derive(Debug, Clone)]
/// Kitchen count report for one day.
pub struct KitchenReport {
    /// Per-component-group totals, main dish first.
    pub component_lines: Vec<ComponentLine>,
    /// Conflict-partitioned per-client rows with subtotal markers.
    pub meal_lines: Vec<MealLine>,
}

#[derive(Debug, Clone)]
/// Delivery route sheet for one route and day.
pub struct RouteSheet {
    /// Per-component-group totals in canonical group order.
    pub summary_lines: Vec<RouteSummaryLine>,
    /// Delivery stops, reordered to match the saved driver sequence.
    pub stops: Vec<DeliveryRecord>,
}

/// Public entry point for building kitchen and route reports.
pub struct LadleService {
    orders: Arc<dyn OrderSource>,
    ingredients: Arc<dyn IngredientLookup>,
    sequences: Arc<dyn SequenceStore>,
    group_order: Arc<dyn GroupOrdering>,
    options: ReportOptions,
    geometry: SheetGeometry,
}

impl LadleService {
    /// Create a new service bound to the provided collaborators.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrderSource>,
        ingredients: Arc<dyn IngredientLookup>,
        sequences: Arc<dyn SequenceStore>,
        group_order: Arc<dyn GroupOrdering>,
    ) -> Self {
        Self {
            orders,
            ingredients,
            sequences,
            group_order,
            options: ReportOptions::default(),
            geometry: SheetGeometry::default(),
        }
    }

    /// Override the report options.
    #[must_use]
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the label sheet geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: SheetGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// List all routes with their display names.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when the order source cannot be queried.
    pub async fn routes(&self) -> Result<Vec<(RouteId, String)>, ReportError> {
        Ok(self.orders.routes().await?)
    }

    /// Build the kitchen count report for the given delivery date.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when a collaborator call fails or an order
    /// references unresolvable data.
    pub async fn kitchen_report(&self, date: NaiveDate) -> Result<KitchenReport, ReportError> {
        let orders = self.orders.kitchen_orders(date).await?;
        let ingredients = self.day_ingredients(&orders, date).await?;
        Ok(KitchenReport {
            component_lines: kitchen::component_lines(&orders, &ingredients)?,
            meal_lines: kitchen::meal_lines(&orders, self.options),
        })
    }

    /// Lay out the meal label sheet for the given delivery date.
    ///
    /// The caller owns rendering and persistence of the sheet; a day with
    /// no orders yields a sheet with zero labels.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when the order source cannot be queried.
    pub async fn label_sheet(&self, date: NaiveDate) -> Result<LabelSheet, ReportError> {
        let orders = self.orders.kitchen_orders(date).await?;
        Ok(labels::make_labels(&orders, date, self.geometry))
    }

    /// Build the delivery route sheet for one route and date.
    ///
    /// The saved driver sequence is advisory: when the sequence store
    /// cannot be read the stops keep their natural order.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when the order source cannot be queried.
    pub async fn route_sheet(
        &self,
        route: RouteId,
        date: NaiveDate,
    ) -> Result<RouteSheet, ReportError> {
        let stops = self.orders.delivery_list(date, route).await?;
        let persisted = match self.sequences.get(route, date).await {
            Ok(sequence) => sequence,
            Err(err) => {
                warn!(%route, %err, "sequence store unavailable, keeping natural stop order");
                Vec::new()
            }
        };
        let stops = route::merge_sequence(stops, &persisted);
        let summary_lines = route::summary_lines(&stops, self.group_order.as_ref());
        Ok(RouteSheet {
            summary_lines,
            stops,
        })
    }

    /// Persist a driver-defined stop sequence for one route and date.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when the sequence store cannot be written.
    pub async fn save_sequence(
        &self,
        route: RouteId,
        date: NaiveDate,
        sequence: Vec<ClientId>,
    ) -> Result<(), ReportError> {
        Ok(self.sequences.set(route, date, sequence).await?)
    }

    /// Prefetch the day's ingredient list for every component the orders
    /// reference, so the report builders can stay synchronous.
    async fn day_ingredients(
        &self,
        orders: &[MealOrder],
        date: NaiveDate,
    ) -> Result<HashMap<ComponentId, Vec<String>>, PortError> {
        let mut map = HashMap::new();
        for order in orders {
            for assigned in &order.components {
                if !map.contains_key(&assigned.component) {
                    let list = self.ingredients.day_ingredients(assigned.component, date).await?;
                    map.insert(assigned.component, list);
                }
            }
        }
        Ok(map)
    }
}
