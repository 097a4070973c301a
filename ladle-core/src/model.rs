//! Domain data structures for clients, meal orders, and delivery records.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a meal-delivery client.
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a delivery route.
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a dish component (a concrete recipe, e.g. one main dish).
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The two supported meal portion sizes.
pub enum MealSize {
    /// Standard portion.
    Regular,
    /// Large portion; only the main dish counts it separately.
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Categories of dish into which exactly one component is assigned per order.
pub enum ComponentGroup {
    /// The main dish; the only group with a separate large-portion count.
    MainDish,
    /// Side dishes.
    Sides,
    /// Green salad.
    GreenSalad,
    /// Fruit salad.
    FruitSalad,
    /// Dessert.
    Dessert,
    /// Pudding.
    Pudding,
    /// Compote.
    Compote,
    /// Kitchen-specific additional group.
    Other(String),
}

impl fmt::Display for ComponentGroup {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            ComponentGroup::MainDish => "main_dish",
            ComponentGroup::Sides => "sides",
            ComponentGroup::GreenSalad => "green_salad",
            ComponentGroup::FruitSalad => "fruit_salad",
            ComponentGroup::Dessert => "dessert",
            ComponentGroup::Pudding => "pudding",
            ComponentGroup::Compote => "compote",
            ComponentGroup::Other(name) => name.as_str(),
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Component assigned to an order for one component group.
pub struct AssignedComponent {
    /// Group the component fills.
    pub group: ComponentGroup,
    /// Identifier of the concrete component, used for ingredient lookups.
    pub component: ComponentId,
    /// Display name of the component.
    pub name: String,
    /// Quantity of this component in the order.
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One client's meal order for a day, as handed over by the order source.
///
/// Immutable input to every report builder; the core never mutates it.
pub struct MealOrder {
    /// Client placing the order.
    pub client: ClientId,
    /// Client last name.
    pub lastname: String,
    /// Client first name.
    pub firstname: String,
    /// Portion size for the whole order.
    pub size: MealSize,
    /// Number of meals ordered (positive).
    pub qty: u32,
    /// One assigned component per component group present in the order.
    pub components: Vec<AssignedComponent>,
    /// Components the client cannot eat.
    pub incompatible_components: Vec<String>,
    /// Ingredients the client cannot eat.
    pub incompatible_ingredients: Vec<String>,
    /// Kitchen preparation notes, in the order they were recorded.
    pub preparation: Vec<String>,
    /// Components restricted for other reasons.
    pub other_components: Vec<String>,
    /// Ingredients restricted for other reasons.
    pub other_ingredients: Vec<String>,
    /// Free-form restricted items.
    pub restricted_items: Vec<String>,
    /// Route the client is delivered on.
    pub route: RouteId,
    /// Display name of the route, printed on meal labels.
    pub route_name: String,
}

impl MealOrder {
    /// Short client label used on report rows and labels: `"Last, Fi."`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let initials: String = self.firstname.chars().take(2).collect();
        format!("{}, {}.", self.lastname, initials)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One component line of a delivery record.
pub struct DeliveryItem {
    /// Component group, when the order line is tied to one.
    pub group: Option<ComponentGroup>,
    /// Portion size of the line.
    pub size: MealSize,
    /// Total quantity delivered for the line.
    pub total_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One delivery stop on a route sheet.
pub struct DeliveryRecord {
    /// Client receiving the delivery.
    pub client: ClientId,
    /// Client last name.
    pub lastname: String,
    /// Client first name.
    pub firstname: String,
    /// Street address shown to the driver.
    pub street: String,
    /// Per-component delivery lines feeding the route summary.
    pub delivery_items: Vec<DeliveryItem>,
}

#[cfg(test)]
mod tests {
    use super::{ClientId, ComponentGroup, MealOrder, MealSize, RouteId};

    #[test]
    fn short_name_truncates_firstname_to_two_chars() {
        let order = MealOrder {
            client: ClientId(1),
            lastname: "Tremblay".to_owned(),
            firstname: "Gabrielle".to_owned(),
            size: MealSize::Regular,
            qty: 1,
            components: Vec::new(),
            incompatible_components: Vec::new(),
            incompatible_ingredients: Vec::new(),
            preparation: Vec::new(),
            other_components: Vec::new(),
            other_ingredients: Vec::new(),
            restricted_items: Vec::new(),
            route: RouteId(1),
            route_name: "Centre-Sud".to_owned(),
        };
        assert_eq!(order.short_name(), "Tremblay, Ga.");
    }

    #[test]
    fn component_group_slugs_are_stable() {
        assert_eq!(ComponentGroup::MainDish.to_string(), "main_dish");
        assert_eq!(ComponentGroup::Other("soup".to_owned()).to_string(), "soup");
    }
}
