//! Traits describing the external collaborators the report engine talks to.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{ClientId, ComponentGroup, ComponentId, DeliveryRecord, MealOrder, RouteId};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to collaborator backends.
pub enum PortError {
    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// No route is registered under the given identifier.
    #[error("Unknown route: {0}")]
    UnknownRoute(RouteId),
    /// No ingredient list is known for the component on the requested day.
    #[error("Unknown component: {0}")]
    UnknownComponent(ComponentId),
    /// Internal collaborator error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(thiserror::Error, Debug)]
/// Errors produced while building a report.
pub enum ReportError {
    /// An order references data the build cannot resolve; the report is
    /// abandoned rather than rendered partially.
    #[error("Data integrity error for client {client}: {detail}")]
    DataIntegrity {
        /// Client whose order triggered the failure.
        client: ClientId,
        /// Human-readable description of the inconsistency.
        detail: String,
    },
    /// A collaborator call failed.
    #[error(transparent)]
    Port(#[from] PortError),
}

#[async_trait]
/// Source of the day's immutable order snapshot.
pub trait OrderSource: Send + Sync {
    /// Fetch every meal order for the given delivery date.
    ///
    /// An empty day returns an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend cannot be queried.
    async fn kitchen_orders(&self, date: NaiveDate) -> Result<Vec<MealOrder>, PortError>;

    /// Fetch the delivery records for one route on the given date, in the
    /// source's natural order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the route is unknown or the backend
    /// cannot be queried.
    async fn delivery_list(
        &self,
        date: NaiveDate,
        route: RouteId,
    ) -> Result<Vec<DeliveryRecord>, PortError>;

    /// List all routes with their display names.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend cannot be queried.
    async fn routes(&self) -> Result<Vec<(RouteId, String)>, PortError>;
}

#[async_trait]
/// Lookup for the ingredient list in effect for a component on a day.
pub trait IngredientLookup: Send + Sync {
    /// Return the ordered ingredient names for the component on that date.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnknownComponent`] when the component has no
    /// ingredient list for the date.
    async fn day_ingredients(
        &self,
        component: ComponentId,
        date: NaiveDate,
    ) -> Result<Vec<String>, PortError>;
}

#[async_trait]
/// Persisted driver-defined stop ordering per route and date.
pub trait SequenceStore: Send + Sync {
    /// Read the last saved client sequence for the route on that date.
    ///
    /// A route without a saved sequence returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend cannot be queried; callers
    /// treat the sequence as advisory and fall back to the natural order.
    async fn get(&self, route: RouteId, date: NaiveDate) -> Result<Vec<ClientId>, PortError>;

    /// Replace the saved client sequence for the route on that date.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend cannot be written.
    async fn set(
        &self,
        route: RouteId,
        date: NaiveDate,
        sequence: Vec<ClientId>,
    ) -> Result<(), PortError>;
}

/// Canonical total order over component groups, used for the route-sheet
/// summary only. Lower ranks print first.
pub trait GroupOrdering: Send + Sync {
    /// Rank of the group within the canonical order.
    fn rank(&self, group: &ComponentGroup) -> u32;
}

impl<F> GroupOrdering for F
where
    F: Fn(&ComponentGroup) -> u32 + Send + Sync,
{
    fn rank(&self, group: &ComponentGroup) -> u32 {
        self(group)
    }
}
