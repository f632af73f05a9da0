//! Menu view: option rows on the left, description of the row under the
//! cursor on the right.

use crossterm::style::Stylize;
use textwrap::{Options, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use archsecure::catalog::Catalog;
use archsecure::domain::selection::{Indicator, LevelId, SelectionTree};

use crate::ui::icon::{indicator, Icon};
use crate::ui::theme;

const MIN_PANEL_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct MenuStyle {
    pub width: usize,
    pub unicode: bool,
    pub color: bool,
}

fn breadcrumb(tree: &SelectionTree, level: LevelId, unicode: bool) -> String {
    let mut path = Vec::new();
    let mut current = Some(level);
    while let Some(id) = current {
        let lvl = tree.level(id);
        if let Some(owner) = lvl.owner() {
            path.push(tree.node(owner).label());
        }
        current = lvl.parent();
    }
    path.push("archsecure");
    path.reverse();
    path.join(if unicode { " › " } else { " > " })
}

pub fn render(
    tree: &SelectionTree,
    level: LevelId,
    catalog: &Catalog,
    style: MenuStyle,
) -> String {
    let at_root = tree.level(level).is_root();
    let mut lines = vec![
        breadcrumb(tree, level, style.unicode),
        format!(
            "j/k move  enter select  n clear  q {}",
            if at_root { "quit" } else { "back" }
        ),
        String::new(),
    ];

    let rows = tree.rows(level);
    let pointer = Icon::Pointer.render(style.unicode);
    let blank = " ".repeat(pointer.width());
    let cells: Vec<(String, bool, Indicator)> = rows
        .iter()
        .map(|row| {
            let lead = if row.is_cursor { pointer } else { blank.as_str() };
            let marker = indicator(row.indicator, style.unicode);
            let cell = if marker.is_empty() {
                format!("{} {}", lead, row.label)
            } else {
                format!("{} {} {}", lead, marker, row.label)
            };
            (cell, row.is_cursor, row.indicator)
        })
        .collect();
    let left_width = cells.iter().map(|(c, _, _)| c.width()).max().unwrap_or(0);

    let description = rows
        .iter()
        .find(|row| row.is_cursor)
        .map(|row| catalog.describe(row.label))
        .unwrap_or("");
    let panel_width = style
        .width
        .saturating_sub(left_width + 3)
        .max(MIN_PANEL_WIDTH);
    let wrapped = textwrap::wrap(
        description,
        Options::new(panel_width).wrap_algorithm(WrapAlgorithm::FirstFit),
    );

    let separator = theme::vertical(style.unicode);
    for i in 0..cells.len().max(wrapped.len()) {
        let (left, plain_width) = match cells.get(i) {
            Some((cell, is_cursor, ind)) => (paint(cell, *is_cursor, *ind, style), cell.width()),
            None => (String::new(), 0),
        };
        let padding = " ".repeat(left_width - plain_width);
        let right = wrapped.get(i).map(|line| line.as_ref()).unwrap_or("");
        let line = format!("{}{} {} {}", left, padding, separator, right);
        lines.push(line.trim_end().to_string());
    }

    lines.push(String::new());
    let checked = tree.checked_labels().len();
    lines.push(format!(
        "{} option{} checked",
        checked,
        if checked == 1 { "" } else { "s" }
    ));
    lines.join("\n")
}

fn paint(cell: &str, is_cursor: bool, ind: Indicator, style: MenuStyle) -> String {
    if !style.color {
        return cell.to_string();
    }
    if is_cursor {
        return format!("{}", cell.with(theme::colors::INFO).bold());
    }
    match ind {
        Indicator::Checkbox(true) | Indicator::Radio(true) | Indicator::Group(true) => {
            format!("{}", cell.with(theme::colors::SUCCESS))
        }
        Indicator::None => format!("{}", cell.with(theme::colors::DIM)),
        _ => cell.to_string(),
    }
}
