//! Meal label sheet layout: one label per meal, packed onto fixed-geometry
//! pages.

use chrono::NaiveDate;

use crate::model::{MealOrder, MealSize};

/// Character width the special-instructions block is wrapped to.
const INSTRUCTION_WRAP_WIDTH: usize = 68;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Physical layout of a label sheet, in millimeters.
///
/// The default matches the adhesive stock the kitchen prints on; renderers
/// must reproduce it exactly for visual parity.
pub struct SheetGeometry {
    /// Sheet width (US Letter).
    pub sheet_width: f64,
    /// Sheet height (US Letter).
    pub sheet_height: f64,
    /// Labels per row.
    pub columns: usize,
    /// Label rows per page.
    pub rows: usize,
    /// Width of one label.
    pub label_width: f64,
    /// Height of one label.
    pub label_height: f64,
    /// Top margin.
    pub top_margin: f64,
    /// Bottom margin.
    pub bottom_margin: f64,
    /// Label corner radius.
    pub corner_radius: f64,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        // 1 inch = 25.4 mm
        Self {
            sheet_width: 8.5 * 25.4,
            sheet_height: 11.0 * 25.4,
            columns: 2,
            rows: 7,
            label_width: 4.0 * 25.4,
            label_height: 1.33 * 25.4,
            top_margin: 20.0,
            bottom_margin: 20.0,
            corner_radius: 2.0,
        }
    }
}

impl SheetGeometry {
    /// Number of labels one page holds.
    #[must_use]
    pub fn page_capacity(&self) -> usize {
        self.rows * self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Rendered field content of a single meal label.
pub struct MealLabel {
    /// Short client label, `"Last, Fi."`.
    pub client: String,
    /// Delivery date, `"%a, %b-%d"`, right-aligned by the renderer.
    pub date: String,
    /// Whether the LARGE marker is shown.
    pub large: bool,
    /// `(j, qty)` ordinal, present only when the order has several meals.
    pub ordinal: Option<(u32, u32)>,
    /// Route display name, right-aligned by the renderer.
    pub route: String,
    /// Wrapped special-instruction lines, top to bottom.
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// A laid-out label sheet: pages of labels plus the geometry they assume.
pub struct LabelSheet {
    /// Sheet geometry the layout was computed for.
    pub geometry: SheetGeometry,
    /// Pages in print order, each at most `geometry.page_capacity()` labels.
    pub pages: Vec<Vec<MealLabel>>,
}

impl LabelSheet {
    /// Total number of labels across all pages.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Number of pages; zero when there is nothing to print.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Expand the day's orders into meal labels and pack them onto pages.
///
/// Orders are laid out sorted by (last name, first name); an order with
/// `qty` meals yields `qty` labels carrying `(j, qty)` ordinals when qty
/// exceeds one. Labels fill pages left to right, top to bottom; page breaks
/// carry no meaning beyond capacity. An empty day yields a sheet with zero
/// labels and zero pages.
#[must_use]
pub fn make_labels(orders: &[MealOrder], date: NaiveDate, geometry: SheetGeometry) -> LabelSheet {
    let mut sorted: Vec<&MealOrder> = orders.iter().collect();
    sorted.sort_by(|left, right| {
        (left.lastname.as_str(), left.firstname.as_str())
            .cmp(&(right.lastname.as_str(), right.firstname.as_str()))
    });

    let date_text = date.format("%a, %b-%d").to_string();
    let capacity = geometry.page_capacity().max(1);

    let mut pages: Vec<Vec<MealLabel>> = Vec::new();
    for order in sorted {
        let instructions = instruction_lines(order);
        for ordinal in 1..=order.qty {
            let label = MealLabel {
                client: order.short_name(),
                date: date_text.clone(),
                large: order.size == MealSize::Large,
                ordinal: (order.qty > 1).then_some((ordinal, order.qty)),
                route: order.route_name.clone(),
                instructions: instructions.clone(),
            };
            match pages.last_mut() {
                Some(page) if page.len() < capacity => page.push(label),
                _ => pages.push(vec![label]),
            }
        }
    }

    LabelSheet { geometry, pages }
}

/// Build the wrapped special-instructions block for one order: preparation
/// notes followed by `"No {item}"` entries for ingredient clashes, other
/// restricted ingredients, and restricted items, joined by `" / "`.
fn instruction_lines(order: &MealOrder) -> Vec<String> {
    let mut special: Vec<String> = order.preparation.clone();
    special.extend(
        order
            .incompatible_ingredients
            .iter()
            .map(|item| format!("No {item}")),
    );
    special.extend(
        order
            .other_ingredients
            .iter()
            .map(|item| format!("No {item}")),
    );
    special.extend(
        order
            .restricted_items
            .iter()
            .map(|item| format!("No {item}")),
    );
    wrap_words(&special.join(" / "), INSTRUCTION_WRAP_WIDTH)
}

/// Greedy word wrap that never splits a word; a word longer than `width`
/// gets a line of its own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
