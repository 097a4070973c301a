//! Kitchen count report: component totals and conflict-partitioned meal lines.

use std::collections::HashMap;

use crate::model::{ClientId, ComponentGroup, ComponentId, MealOrder, MealSize};
use crate::ports::ReportError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Cumulative count for one component group on the kitchen report.
pub struct ComponentLine {
    /// Component group the line summarizes.
    pub group: ComponentGroup,
    /// Display name of the component, fixed by its first occurrence.
    pub name: String,
    /// Comma-joined ingredient names in effect for the day.
    pub ingredients: String,
    /// Cumulative regular-size quantity.
    pub regular: u32,
    /// Cumulative large-size quantity (main dish only).
    pub large: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-client data carried by a [`MealLine::Data`] row.
pub struct MealRow {
    /// Short client label, `"Last, Fi."`.
    pub client: String,
    /// Quantity when the order is regular size, otherwise empty.
    pub regular: String,
    /// Quantity when the order is large size, otherwise empty.
    pub large: String,
    /// Comma-joined incompatible components.
    pub component_clash: String,
    /// Comma-joined incompatible ingredients.
    pub ingredient_clash: String,
    /// Comma-joined preparation notes.
    pub preparation: String,
    /// Comma-joined other restricted components.
    pub other_components: String,
    /// Comma-joined other restricted ingredients.
    pub other_ingredients: String,
    /// Comma-joined restricted items.
    pub restricted_items: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the meal-specifics half of the kitchen report.
pub enum MealLine {
    /// A client's order.
    Data(MealRow),
    /// Subtotal closing a partition or ingredient-clash combination.
    Subtotal {
        /// Cumulative regular-size quantity.
        regular: u32,
        /// Cumulative large-size quantity.
        large: u32,
    },
    /// Grand total of the three special-handling partitions.
    TotalSpecials {
        /// Cumulative regular-size quantity.
        regular: u32,
        /// Cumulative large-size quantity.
        large: u32,
    },
}

#[derive(Debug, Clone, Copy, Default)]
/// Knobs controlling what the meal-line report includes.
pub struct ReportOptions {
    /// Emit the rows of the other-restrictions-only partition. The legacy
    /// report counts these orders in the closing subtotal but leaves their
    /// rows off the printed sheet; kept behind a flag until the kitchen
    /// decides which behavior it wants.
    pub print_other_restrictions: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Running per-size quantity accumulator threaded through the passes.
struct Tally {
    regular: u32,
    large: u32,
}

impl Tally {
    fn add(self, order: &MealOrder) -> Self {
        match order.size {
            MealSize::Regular => Self {
                regular: self.regular + order.qty,
                ..self
            },
            MealSize::Large => Self {
                large: self.large + order.qty,
                ..self
            },
        }
    }

    fn plus(self, other: Self) -> Self {
        Self {
            regular: self.regular + other.regular,
            large: self.large + other.large,
        }
    }

    fn is_zero(self) -> bool {
        self.regular == 0 && self.large == 0
    }
}

/// Aggregate the day's orders into one [`ComponentLine`] per component group.
///
/// `ingredients` maps every component id referenced by the orders to its
/// ingredient list for the day; the service prefetches it through the
/// [`crate::ports::IngredientLookup`] port. The first order naming a group
/// fixes the line's display name and ingredient list, later orders only add
/// quantity. Large portions count separately for the main dish only. The
/// result puts the main dish first, then the remaining groups by slug
/// ascending.
///
/// # Errors
///
/// Returns [`ReportError::DataIntegrity`] when an order references a
/// component missing from `ingredients`, or when orders exist but none
/// carries a main dish.
pub fn component_lines(
    orders: &[MealOrder],
    ingredients: &HashMap<ComponentId, Vec<String>>,
) -> Result<Vec<ComponentLine>, ReportError> {
    let mut lines: Vec<ComponentLine> = Vec::new();

    for order in orders {
        for assigned in &order.components {
            let index = match lines.iter().position(|line| line.group == assigned.group) {
                Some(existing) => existing,
                None => {
                    let list = ingredients.get(&assigned.component).ok_or_else(|| {
                        ReportError::DataIntegrity {
                            client: order.client,
                            detail: format!(
                                "no ingredient list for component {} ({})",
                                assigned.component, assigned.name
                            ),
                        }
                    })?;
                    lines.push(ComponentLine {
                        group: assigned.group.clone(),
                        name: assigned.name.clone(),
                        ingredients: list.join(", "),
                        regular: 0,
                        large: 0,
                    });
                    lines.len() - 1
                }
            };
            if let Some(line) = lines.get_mut(index) {
                if line.group == ComponentGroup::MainDish && order.size == MealSize::Large {
                    line.large += assigned.qty;
                } else {
                    line.regular += assigned.qty;
                }
            }
        }
    }

    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let Some(main_index) = lines
        .iter()
        .position(|line| line.group == ComponentGroup::MainDish)
    else {
        let client = orders.first().map_or(ClientId(0), |order| order.client);
        return Err(ReportError::DataIntegrity {
            client,
            detail: "no main dish assigned for the day".to_owned(),
        });
    };

    let main_line = lines.remove(main_index);
    lines.sort_by_key(|line| line.group.to_string());
    let mut sorted = vec![main_line];
    sorted.extend(lines);
    Ok(sorted)
}

/// Build the conflict-partitioned meal lines of the kitchen count report.
///
/// Orders are split into five disjoint partitions evaluated in fixed order:
/// component clashes, ingredient clashes, preparation only, other
/// restrictions only, and no special handling. Each partition is sorted
/// internally and closed by a subtotal; the ingredient-clash partition gets
/// one subtotal per distinct clash combination, and a grand total follows
/// the first three partitions. Subtotals and totals are appended only when
/// non-zero. The other-restrictions partition always counts toward the
/// final subtotal but emits rows only when
/// [`ReportOptions::print_other_restrictions`] is set.
#[must_use]
pub fn meal_lines(orders: &[MealOrder], options: ReportOptions) -> Vec<MealLine> {
    let mut lines = Vec::new();

    // 1. component clashes
    let mut subtotal = Tally::default();
    for order in sorted_by_name(orders, |order| !order.incompatible_components.is_empty()) {
        lines.push(data_row(order));
        subtotal = subtotal.add(order);
    }
    push_subtotal(&mut lines, subtotal);
    let mut total = subtotal;

    // 2. ingredient clashes, no component clashes; subtotal per combination
    let mut pass: Vec<&MealOrder> = orders
        .iter()
        .filter(|order| {
            !order.incompatible_ingredients.is_empty() && order.incompatible_components.is_empty()
        })
        .collect();
    pass.sort_by(|left, right| {
        left.incompatible_ingredients
            .cmp(&right.incompatible_ingredients)
    });
    let mut subtotal = Tally::default();
    let mut run = pass.iter().peekable();
    while let Some(order) = run.next() {
        lines.push(data_row(order));
        subtotal = subtotal.add(order);
        let combination_ends = run
            .peek()
            .is_none_or(|next| next.incompatible_ingredients != order.incompatible_ingredients);
        if combination_ends {
            push_subtotal(&mut lines, subtotal);
            total = total.plus(subtotal);
            subtotal = Tally::default();
        }
    }

    // 3. no clashes but preparation notes
    let mut subtotal = Tally::default();
    for order in sorted_by_name(orders, |order| {
        order.incompatible_components.is_empty()
            && order.incompatible_ingredients.is_empty()
            && !order.preparation.is_empty()
    }) {
        lines.push(data_row(order));
        subtotal = subtotal.add(order);
    }
    push_subtotal(&mut lines, subtotal);
    total = total.plus(subtotal);
    if !total.is_zero() {
        lines.push(MealLine::TotalSpecials {
            regular: total.regular,
            large: total.large,
        });
    }

    // 4. no clashes nor preparation but other restrictions; the subtotal is
    // not flushed here, it carries into the final partition
    let mut subtotal = Tally::default();
    for order in sorted_by_name(orders, |order| {
        order.incompatible_components.is_empty()
            && order.incompatible_ingredients.is_empty()
            && order.preparation.is_empty()
            && has_other_restrictions(order)
    }) {
        if options.print_other_restrictions {
            lines.push(data_row(order));
        }
        subtotal = subtotal.add(order);
    }

    // 5. no special handling at all
    for order in sorted_by_name(orders, |order| {
        order.incompatible_components.is_empty()
            && order.incompatible_ingredients.is_empty()
            && order.preparation.is_empty()
            && !has_other_restrictions(order)
    }) {
        lines.push(data_row(order));
        subtotal = subtotal.add(order);
    }
    push_subtotal(&mut lines, subtotal);

    lines
}

fn has_other_restrictions(order: &MealOrder) -> bool {
    !order.other_components.is_empty()
        || !order.other_ingredients.is_empty()
        || !order.restricted_items.is_empty()
}

fn sorted_by_name<'orders>(
    orders: &'orders [MealOrder],
    keep: impl Fn(&MealOrder) -> bool,
) -> Vec<&'orders MealOrder> {
    let mut pass: Vec<&MealOrder> = orders.iter().filter(|order| keep(order)).collect();
    pass.sort_by(|left, right| {
        (left.lastname.as_str(), left.firstname.as_str())
            .cmp(&(right.lastname.as_str(), right.firstname.as_str()))
    });
    pass
}

fn data_row(order: &MealOrder) -> MealLine {
    let (regular, large) = match order.size {
        MealSize::Regular => (order.qty.to_string(), String::new()),
        MealSize::Large => (String::new(), order.qty.to_string()),
    };
    MealLine::Data(MealRow {
        client: order.short_name(),
        regular,
        large,
        component_clash: order.incompatible_components.join(", "),
        ingredient_clash: order.incompatible_ingredients.join(", "),
        preparation: order.preparation.join(", "),
        other_components: order.other_components.join(", "),
        other_ingredients: order.other_ingredients.join(", "),
        restricted_items: order.restricted_items.join(", "),
    })
}

fn push_subtotal(lines: &mut Vec<MealLine>, tally: Tally) {
    if !tally.is_zero() {
        lines.push(MealLine::Subtotal {
            regular: tally.regular,
            large: tally.large,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{component_lines, meal_lines, ComponentLine, MealLine, ReportOptions};
    use crate::model::{
        AssignedComponent, ClientId, ComponentGroup, ComponentId, MealOrder, MealSize, RouteId,
    };
    use crate::ports::ReportError;

    fn order(id: u32, lastname: &str, firstname: &str, size: MealSize, qty: u32) -> MealOrder {
        MealOrder {
            client: ClientId(id),
            lastname: lastname.to_owned(),
            firstname: firstname.to_owned(),
            size,
            qty,
            components: vec![AssignedComponent {
                group: ComponentGroup::MainDish,
                component: ComponentId(10),
                name: "Shepherd's pie".to_owned(),
                qty,
            }],
            incompatible_components: Vec::new(),
            incompatible_ingredients: Vec::new(),
            preparation: Vec::new(),
            other_components: Vec::new(),
            other_ingredients: Vec::new(),
            restricted_items: Vec::new(),
            route: RouteId(1),
            route_name: "Plateau".to_owned(),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    fn main_dish_ingredients() -> HashMap<ComponentId, Vec<String>> {
        HashMap::from([(ComponentId(10), strings(&["beef", "potato", "corn"]))])
    }

    #[test]
    fn component_lines_route_large_to_main_dish_only() {
        let mut large = order(1, "Roy", "Anne", MealSize::Large, 2);
        large.components.push(AssignedComponent {
            group: ComponentGroup::Dessert,
            component: ComponentId(20),
            name: "Rice pudding".to_owned(),
            qty: 2,
        });
        let regular = order(2, "Blais", "Marc", MealSize::Regular, 1);

        let mut ingredients = main_dish_ingredients();
        ingredients.insert(ComponentId(20), strings(&["rice", "milk"]));

        let lines = component_lines(&[large, regular], &ingredients).unwrap();
        assert_eq!(
            lines,
            vec![
                ComponentLine {
                    group: ComponentGroup::MainDish,
                    name: "Shepherd's pie".to_owned(),
                    ingredients: "beef, potato, corn".to_owned(),
                    regular: 1,
                    large: 2,
                },
                ComponentLine {
                    group: ComponentGroup::Dessert,
                    name: "Rice pudding".to_owned(),
                    ingredients: "rice, milk".to_owned(),
                    regular: 2,
                    large: 0,
                },
            ]
        );
    }

    #[test]
    fn component_lines_put_main_dish_first_then_slug_order() {
        let mut one = order(1, "Roy", "Anne", MealSize::Regular, 1);
        one.components.push(AssignedComponent {
            group: ComponentGroup::Sides,
            component: ComponentId(30),
            name: "Green beans".to_owned(),
            qty: 1,
        });
        one.components.push(AssignedComponent {
            group: ComponentGroup::Compote,
            component: ComponentId(40),
            name: "Apple compote".to_owned(),
            qty: 1,
        });

        let mut ingredients = main_dish_ingredients();
        ingredients.insert(ComponentId(30), strings(&["green beans"]));
        ingredients.insert(ComponentId(40), strings(&["apple"]));

        let lines = component_lines(&[one], &ingredients).unwrap();
        let groups: Vec<String> = lines.iter().map(|line| line.group.to_string()).collect();
        assert_eq!(groups, vec!["main_dish", "compote", "sides"]);
    }

    #[test]
    fn component_lines_bind_name_to_first_occurrence() {
        let first = order(1, "Roy", "Anne", MealSize::Regular, 1);
        let mut second = order(2, "Blais", "Marc", MealSize::Regular, 3);
        second.components = vec![AssignedComponent {
            group: ComponentGroup::MainDish,
            component: ComponentId(10),
            name: "Renamed pie".to_owned(),
            qty: 3,
        }];

        let lines = component_lines(&[first, second], &main_dish_ingredients()).unwrap();
        assert_eq!(lines.len(), 1);
        let main = lines.first().unwrap();
        assert_eq!(main.name, "Shepherd's pie");
        assert_eq!(main.regular, 4);
    }

    #[test]
    fn component_lines_fail_on_unknown_ingredient_list() {
        let one = order(7, "Roy", "Anne", MealSize::Regular, 1);
        let err = component_lines(&[one], &HashMap::new()).unwrap_err();
        match err {
            ReportError::DataIntegrity { client, .. } => assert_eq!(client, ClientId(7)),
            ReportError::Port(_) => panic!("expected a data integrity error"),
        }
    }

    #[test]
    fn component_lines_fail_without_a_main_dish() {
        let mut one = order(3, "Roy", "Anne", MealSize::Regular, 1);
        one.components = vec![AssignedComponent {
            group: ComponentGroup::Dessert,
            component: ComponentId(20),
            name: "Rice pudding".to_owned(),
            qty: 1,
        }];
        let ingredients = HashMap::from([(ComponentId(20), strings(&["rice"]))]);
        assert!(component_lines(&[one], &ingredients).is_err());
    }

    #[test]
    fn empty_day_produces_empty_reports() {
        assert!(component_lines(&[], &HashMap::new()).unwrap().is_empty());
        assert!(meal_lines(&[], ReportOptions::default()).is_empty());
    }

    #[test]
    fn two_order_scenario_partitions_and_totals() {
        // A: qty 2, regular, no conflicts. B: qty 1, large, component clash.
        let a = order(1, "Arsenault", "Paul", MealSize::Regular, 2);
        let mut b = order(2, "Belanger", "Lise", MealSize::Large, 1);
        b.incompatible_components = strings(&["Tofu"]);

        let lines = meal_lines(&[a, b], ReportOptions::default());
        assert_eq!(lines.len(), 5);

        let mut rows = lines.iter();
        match rows.next().unwrap() {
            MealLine::Data(row) => {
                assert_eq!(row.client, "Belanger, Li.");
                assert_eq!(row.component_clash, "Tofu");
                assert_eq!(row.regular, "");
                assert_eq!(row.large, "1");
            }
            line => panic!("expected B's data row, got {line:?}"),
        }
        assert_eq!(
            rows.next().unwrap(),
            &MealLine::Subtotal {
                regular: 0,
                large: 1
            }
        );
        assert_eq!(
            rows.next().unwrap(),
            &MealLine::TotalSpecials {
                regular: 0,
                large: 1
            }
        );
        match rows.next().unwrap() {
            MealLine::Data(row) => assert_eq!(row.client, "Arsenault, Pa."),
            line => panic!("expected A's data row, got {line:?}"),
        }
        assert_eq!(
            rows.next().unwrap(),
            &MealLine::Subtotal {
                regular: 2,
                large: 0
            }
        );
    }

    #[test]
    fn ingredient_clash_pass_subtotals_each_combination() {
        let mut one = order(1, "Roy", "Anne", MealSize::Regular, 1);
        one.incompatible_ingredients = strings(&["nuts"]);
        let mut two = order(2, "Blais", "Marc", MealSize::Regular, 2);
        two.incompatible_ingredients = strings(&["nuts"]);
        let mut three = order(3, "Cyr", "Eve", MealSize::Large, 1);
        three.incompatible_ingredients = strings(&["shellfish"]);

        let lines = meal_lines(&[one, two, three], ReportOptions::default());

        let subtotals: Vec<(u32, u32)> = lines
            .iter()
            .filter_map(|line| match line {
                MealLine::Subtotal { regular, large } => Some((*regular, *large)),
                _ => None,
            })
            .collect();
        // one per clash combination, none for the empty later passes
        assert_eq!(subtotals, vec![(3, 0), (0, 1)]);
        assert!(lines.iter().any(|line| matches!(
            line,
            MealLine::TotalSpecials {
                regular: 3,
                large: 1
            }
        )));
    }

    #[test]
    fn preparation_only_orders_land_in_third_pass() {
        let mut one = order(1, "Roy", "Anne", MealSize::Regular, 1);
        one.preparation = strings(&["puree"]);
        let mut two = order(2, "Blais", "Marc", MealSize::Regular, 1);
        two.preparation = strings(&["cut up"]);
        two.incompatible_ingredients = strings(&["nuts"]);

        let lines = meal_lines(&[one, two], ReportOptions::default());
        // the ingredient clash wins for Blais, so the pass order is Blais
        // (pass 2), subtotal, Roy (pass 3), subtotal, then the grand total
        let clients: Vec<&str> = lines
            .iter()
            .filter_map(|line| match line {
                MealLine::Data(row) => Some(row.client.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(clients, vec!["Blais, Ma.", "Roy, An."]);
        assert!(lines.iter().any(|line| matches!(
            line,
            MealLine::TotalSpecials {
                regular: 2,
                large: 0
            }
        )));
    }

    #[test]
    fn other_restrictions_rows_are_counted_but_hidden_by_default() {
        let mut restricted = order(1, "Roy", "Anne", MealSize::Regular, 2);
        restricted.restricted_items = strings(&["salt"]);
        let plain = order(2, "Blais", "Marc", MealSize::Regular, 1);

        let hidden = meal_lines(
            &[restricted.clone(), plain.clone()],
            ReportOptions::default(),
        );
        let data_count = hidden
            .iter()
            .filter(|line| matches!(line, MealLine::Data(_)))
            .count();
        assert_eq!(data_count, 1);
        // the closing subtotal still covers both orders
        assert_eq!(
            hidden.last().unwrap(),
            &MealLine::Subtotal {
                regular: 3,
                large: 0
            }
        );

        let printed = meal_lines(
            &[restricted, plain],
            ReportOptions {
                print_other_restrictions: true,
            },
        );
        let data_count = printed
            .iter()
            .filter(|line| matches!(line, MealLine::Data(_)))
            .count();
        assert_eq!(data_count, 2);
    }

    #[test]
    fn every_order_lands_in_exactly_one_partition() {
        let mut orders = Vec::new();
        let mut component_clash = order(1, "Roy", "Anne", MealSize::Regular, 1);
        component_clash.incompatible_components = strings(&["Tofu"]);
        component_clash.preparation = strings(&["puree"]);
        orders.push(component_clash);
        let mut ingredient_clash = order(2, "Blais", "Marc", MealSize::Large, 1);
        ingredient_clash.incompatible_ingredients = strings(&["nuts"]);
        ingredient_clash.other_components = strings(&["soup"]);
        orders.push(ingredient_clash);
        let mut preparation = order(3, "Cyr", "Eve", MealSize::Regular, 1);
        preparation.preparation = strings(&["cut up"]);
        orders.push(preparation);
        let mut restricted = order(4, "Dion", "Luc", MealSize::Regular, 1);
        restricted.other_ingredients = strings(&["salt"]);
        orders.push(restricted);
        orders.push(order(5, "Roux", "Mia", MealSize::Regular, 1));

        let lines = meal_lines(
            &orders,
            ReportOptions {
                print_other_restrictions: true,
            },
        );
        let data_count = lines
            .iter()
            .filter(|line| matches!(line, MealLine::Data(_)))
            .count();
        assert_eq!(data_count, orders.len());
    }
}
