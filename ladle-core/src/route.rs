//! Delivery route sheet: per-group summary lines and the stop-sequence
//! merge.

use crate::model::{ClientId, ComponentGroup, DeliveryRecord, MealSize};
use crate::ports::GroupOrdering;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Cumulative count for one component group on the route sheet.
///
/// Immutable: quantity updates replace the line with a new value.
pub struct RouteSummaryLine {
    /// Component group the line summarizes.
    pub group: ComponentGroup,
    /// Cumulative regular-size quantity.
    pub regular: u32,
    /// Cumulative large-size quantity (main dish only).
    pub large: u32,
}

impl RouteSummaryLine {
    fn new(group: ComponentGroup) -> Self {
        Self {
            group,
            regular: 0,
            large: 0,
        }
    }

    fn with_regular(self, qty: u32) -> Self {
        Self {
            regular: self.regular + qty,
            ..self
        }
    }

    fn with_large(self, qty: u32) -> Self {
        Self {
            large: self.large + qty,
            ..self
        }
    }
}

/// Aggregate the delivery items of all stops into one summary line per
/// component group, sorted by the supplied canonical group order.
///
/// Items without a component group are skipped. As on the kitchen side,
/// the large column is used only for large main-dish lines; every other
/// group accumulates into the regular column regardless of size.
#[must_use]
pub fn summary_lines(stops: &[DeliveryRecord], order: &dyn GroupOrdering) -> Vec<RouteSummaryLine> {
    let mut lines: Vec<RouteSummaryLine> = Vec::new();

    for stop in stops {
        for item in &stop.delivery_items {
            let Some(group) = &item.group else {
                continue;
            };
            let index = lines
                .iter()
                .position(|line| &line.group == group)
                .unwrap_or_else(|| {
                    lines.push(RouteSummaryLine::new(group.clone()));
                    lines.len() - 1
                });
            if let Some(slot) = lines.get_mut(index) {
                let line = slot.clone();
                *slot = if *group == ComponentGroup::MainDish && item.size == MealSize::Large {
                    line.with_large(item.total_quantity)
                } else {
                    line.with_regular(item.total_quantity)
                };
            }
        }
    }

    lines.sort_by_key(|line| order.rank(&line.group));
    lines
}

/// Reorder the day's delivery stops to match a persisted client sequence.
///
/// Stops named by `persisted` come first, in persisted order; clients no
/// longer on the route are skipped. Stops the sequence does not know are
/// appended afterwards in their incoming relative order. Every stop of
/// `current` appears exactly once in the result, with its data taken from
/// `current` — the persisted sequence only ever supplies ordering.
#[must_use]
pub fn merge_sequence(current: Vec<DeliveryRecord>, persisted: &[ClientId]) -> Vec<DeliveryRecord> {
    let mut remaining: Vec<Option<DeliveryRecord>> = current.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(remaining.len());

    for client in persisted {
        if let Some(slot) = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|stop| stop.client == *client))
        {
            if let Some(stop) = slot.take() {
                merged.push(stop);
            }
        }
    }
    merged.extend(remaining.into_iter().flatten());
    merged
}

#[cfg(test)]
mod tests {
    use super::{merge_sequence, summary_lines};
    use crate::model::{ClientId, ComponentGroup, DeliveryItem, DeliveryRecord, MealSize};

    fn stop(id: u32, lastname: &str) -> DeliveryRecord {
        DeliveryRecord {
            client: ClientId(id),
            lastname: lastname.to_owned(),
            firstname: "Jean".to_owned(),
            street: "4450 Rue Saint-Hubert".to_owned(),
            delivery_items: Vec::new(),
        }
    }

    fn item(group: Option<ComponentGroup>, size: MealSize, qty: u32) -> DeliveryItem {
        DeliveryItem {
            group,
            size,
            total_quantity: qty,
        }
    }

    fn canonical(group: &ComponentGroup) -> u32 {
        match group {
            ComponentGroup::MainDish => 0,
            ComponentGroup::Dessert => 1,
            _ => 9,
        }
    }

    #[test]
    fn summary_routes_large_main_dish_separately() {
        let mut one = stop(1, "Roy");
        one.delivery_items = vec![
            item(Some(ComponentGroup::MainDish), MealSize::Large, 2),
            item(Some(ComponentGroup::Dessert), MealSize::Large, 2),
        ];
        let mut two = stop(2, "Blais");
        two.delivery_items = vec![
            item(Some(ComponentGroup::MainDish), MealSize::Regular, 1),
            item(None, MealSize::Regular, 1),
        ];

        let lines = summary_lines(&[one, two], &canonical);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].group, ComponentGroup::MainDish);
        assert_eq!((lines[0].regular, lines[0].large), (1, 2));
        // non-main groups accumulate regular regardless of size
        assert_eq!(lines[1].group, ComponentGroup::Dessert);
        assert_eq!((lines[1].regular, lines[1].large), (2, 0));
    }

    #[test]
    fn summary_sorts_by_canonical_rank() {
        let mut one = stop(1, "Roy");
        one.delivery_items = vec![
            item(Some(ComponentGroup::Dessert), MealSize::Regular, 1),
            item(Some(ComponentGroup::MainDish), MealSize::Regular, 1),
        ];
        let lines = summary_lines(&[one], &canonical);
        let groups: Vec<&ComponentGroup> = lines.iter().map(|line| &line.group).collect();
        assert_eq!(
            groups,
            vec![&ComponentGroup::MainDish, &ComponentGroup::Dessert]
        );
    }

    #[test]
    fn merge_follows_persisted_order_then_appends_new_stops() {
        let current = vec![stop(1, "Roy"), stop(2, "Blais"), stop(3, "Cyr")];
        let persisted = vec![ClientId(3), ClientId(1)];

        let merged = merge_sequence(current, &persisted);
        let ids: Vec<ClientId> = merged.iter().map(|stop| stop.client).collect();
        assert_eq!(ids, vec![ClientId(3), ClientId(1), ClientId(2)]);
    }

    #[test]
    fn merge_skips_stale_and_unknown_persisted_clients() {
        let current = vec![stop(1, "Roy"), stop(2, "Blais")];
        let persisted = vec![ClientId(9), ClientId(2), ClientId(9)];

        let merged = merge_sequence(current, &persisted);
        let ids: Vec<ClientId> = merged.iter().map(|stop| stop.client).collect();
        assert_eq!(ids, vec![ClientId(2), ClientId(1)]);
    }

    #[test]
    fn merge_is_length_preserving() {
        let current = vec![stop(1, "Roy"), stop(2, "Blais"), stop(3, "Cyr")];
        for persisted in [
            Vec::new(),
            vec![ClientId(2)],
            vec![ClientId(3), ClientId(2), ClientId(1), ClientId(8)],
        ] {
            let merged = merge_sequence(current.clone(), &persisted);
            assert_eq!(merged.len(), current.len());
        }
    }

    #[test]
    fn merge_keeps_current_data_for_persisted_stops() {
        let mut one = stop(1, "Roy");
        one.delivery_items = vec![item(Some(ComponentGroup::MainDish), MealSize::Regular, 4)];
        let merged = merge_sequence(vec![one.clone()], &[ClientId(1)]);
        assert_eq!(merged, vec![one]);
    }
}
