//! Print the option tree

use anyhow::Result;
use textwrap::{Options, WrapAlgorithm};

use archsecure::catalog::Catalog;
use archsecure::domain::selection::{LevelId, NodeKind, SelectionTree};

use super::Session;
use crate::ui::icon::indicator;

const INDENT: &str = "    ";

pub fn run(session: &Session) -> Result<u8> {
    let tree = session.tree(&[])?;
    if session.ui.json {
        println!("{}", serde_json::to_string_pretty(&session.catalog.export(&tree))?);
    } else {
        let width = session.ui.caps.width as usize;
        print!("{}", render(&tree, &session.catalog, session.ui.unicode, width));
    }
    Ok(0)
}

/// Every option with its marker and wrapped description, nested by level
pub fn render(tree: &SelectionTree, catalog: &Catalog, unicode: bool, width: usize) -> String {
    let mut out = String::new();
    render_level(tree, tree.root(), catalog, unicode, width, 0, &mut out);
    out
}

fn render_level(
    tree: &SelectionTree,
    level: LevelId,
    catalog: &Catalog,
    unicode: bool,
    width: usize,
    depth: usize,
    out: &mut String,
) {
    let indent = INDENT.repeat(depth);
    for row in tree.rows(level) {
        let kind = tree.node(row.node).kind();
        if matches!(kind, NodeKind::Action(_) | NodeKind::Terminal) {
            continue;
        }
        out.push_str(&format!(
            "{}{} {}\n",
            indent,
            indicator(row.indicator, unicode),
            row.label
        ));

        let description = catalog.describe(row.label);
        if !description.is_empty() {
            let text_indent = format!("{}{}", indent, INDENT);
            let options = Options::new(width.saturating_sub(text_indent.len()).max(20))
                .wrap_algorithm(WrapAlgorithm::FirstFit);
            for line in textwrap::wrap(description, options) {
                out.push_str(&format!("{}{}\n", text_indent, line));
            }
        }

        if let NodeKind::Group(child) = kind {
            render_level(tree, child, catalog, unicode, width, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archsecure::domain::selection::OptionSpec;

    #[test]
    fn nested_levels_are_indented_and_navigation_hidden() {
        let catalog = Catalog::new(vec![
            OptionSpec::group(
                "Site policy",
                vec![OptionSpec::radio("Strict").checked().described("Deny all.")],
            ),
            OptionSpec::checkbox("Extra"),
        ]);
        let tree = catalog.build_tree(&[]).unwrap();

        let out = render(&tree, &catalog, false, 80);

        assert_eq!(
            out,
            "[+] Site policy\n    (*) Strict\n        Deny all.\n[ ] Extra\n"
        );
    }

    #[test]
    fn builtin_catalog_lists_every_option() {
        let catalog = Catalog::builtin();
        let tree = catalog.build_tree(&[]).unwrap();

        let out = render(&tree, &catalog, true, 100);

        assert!(out.contains("Harden Firewall"));
        assert!(out.contains("    ○ Use UFW"));
        assert!(!out.contains("Secure Computer!"));
        assert!(!out.contains("<- Back"));
    }
}
