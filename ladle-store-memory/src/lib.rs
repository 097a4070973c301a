//! In-memory collaborator backends for ladle.
//!
//! Implements the order source, ingredient lookup, and sequence store ports
//! over plain maps behind an [`RwLock`]. Meant for tests, demos, and as a
//! template for a real persistence adapter.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use ladle_core::{
    model::{ClientId, ComponentGroup, ComponentId, DeliveryRecord, MealOrder, RouteId},
    ports::{IngredientLookup, OrderSource, PortError, SequenceStore},
};

/// Canonical component-group order used for route-sheet summaries: main
/// dish first, then sides and salads, the sweet groups after, anything
/// kitchen-specific last.
#[must_use]
pub fn canonical_group_rank(group: &ComponentGroup) -> u32 {
    match group {
        ComponentGroup::MainDish => 0,
        ComponentGroup::Sides => 1,
        ComponentGroup::GreenSalad => 2,
        ComponentGroup::FruitSalad => 3,
        ComponentGroup::Dessert => 4,
        ComponentGroup::Pudding => 5,
        ComponentGroup::Compote => 6,
        ComponentGroup::Other(_) => 7,
    }
}

#[derive(Default)]
struct State {
    routes: Vec<(RouteId, String)>,
    orders: HashMap<NaiveDate, Vec<MealOrder>>,
    deliveries: HashMap<(NaiveDate, RouteId), Vec<DeliveryRecord>>,
    ingredients: HashMap<(ComponentId, NaiveDate), Vec<String>>,
    sequences: HashMap<(RouteId, NaiveDate), Vec<ClientId>>,
}

/// In-memory store implementing every ladle collaborator port.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route under its display name.
    pub fn insert_route(&self, route: RouteId, name: &str) {
        self.write_state().routes.push((route, name.to_owned()));
    }

    /// Add meal orders to a delivery date.
    pub fn insert_orders(&self, date: NaiveDate, orders: Vec<MealOrder>) {
        self.write_state().orders.entry(date).or_default().extend(orders);
    }

    /// Add delivery records to a route for a date.
    pub fn insert_deliveries(&self, date: NaiveDate, route: RouteId, stops: Vec<DeliveryRecord>) {
        self.write_state()
            .deliveries
            .entry((date, route))
            .or_default()
            .extend(stops);
    }

    /// Set the ingredient list of a component for a date.
    pub fn insert_ingredients(
        &self,
        component: ComponentId,
        date: NaiveDate,
        ingredients: Vec<String>,
    ) {
        self.write_state()
            .ingredients
            .insert((component, date), ingredients);
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().expect("store lock poisoned")
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, State>, PortError> {
        self.state
            .read()
            .map_err(|err| PortError::Internal(err.to_string()))
    }
}

#[async_trait]
impl OrderSource for MemoryStore {
    async fn kitchen_orders(&self, date: NaiveDate) -> Result<Vec<MealOrder>, PortError> {
        let state = self.read_state()?;
        Ok(state.orders.get(&date).cloned().unwrap_or_default())
    }

    async fn delivery_list(
        &self,
        date: NaiveDate,
        route: RouteId,
    ) -> Result<Vec<DeliveryRecord>, PortError> {
        let state = self.read_state()?;
        if !state.routes.iter().any(|(id, _)| *id == route) {
            return Err(PortError::UnknownRoute(route));
        }
        Ok(state
            .deliveries
            .get(&(date, route))
            .cloned()
            .unwrap_or_default())
    }

    async fn routes(&self) -> Result<Vec<(RouteId, String)>, PortError> {
        Ok(self.read_state()?.routes.clone())
    }
}

#[async_trait]
impl IngredientLookup for MemoryStore {
    async fn day_ingredients(
        &self,
        component: ComponentId,
        date: NaiveDate,
    ) -> Result<Vec<String>, PortError> {
        let state = self.read_state()?;
        state
            .ingredients
            .get(&(component, date))
            .cloned()
            .ok_or(PortError::UnknownComponent(component))
    }
}

#[async_trait]
impl SequenceStore for MemoryStore {
    async fn get(&self, route: RouteId, date: NaiveDate) -> Result<Vec<ClientId>, PortError> {
        let state = self.read_state()?;
        Ok(state
            .sequences
            .get(&(route, date))
            .cloned()
            .unwrap_or_default())
    }

    async fn set(
        &self,
        route: RouteId,
        date: NaiveDate,
        sequence: Vec<ClientId>,
    ) -> Result<(), PortError> {
        self.state
            .write()
            .map_err(|err| PortError::Internal(err.to_string()))?
            .sequences
            .insert((route, date), sequence);
        Ok(())
    }
}
