//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which shows the resources a
//! project's configuration selects from the library.
//!
//! ## Functionality
//!
//! - **Category Filter**: `list prompts` narrows output to one category
//! - **Search**: `--search TEXT` keeps paths containing TEXT (case-insensitive)
//! - **JSON Output**: `--json` prints the structured selection
//! - **Tree Output**: `--tree` renders selected paths as a directory tree
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::TreeItem;
use std::borrow::Cow;
use std::io::{self, Write};

use library_sync::output::{emoji, heading, OutputConfig};
use library_sync::phases::report::StructuredSelection;
use library_sync::resource::ResourceCategory;
use library_sync::suggestions;

use super::Context;

/// List the resources selected by the configuration
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list this category (prompts, templates, patterns, configs, scripts, workflows)
    #[arg(value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Print the selection as JSON
    #[arg(long, conflicts_with = "tree")]
    pub json: bool,

    /// Render selected resources as a tree
    #[arg(long)]
    pub tree: bool,

    /// Only show paths containing TEXT (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, context: &Context) -> Result<()> {
    let category = match &args.category {
        Some(name) => Some(
            name.parse::<ResourceCategory>()
                .map_err(|_| suggestions::unknown_category(name))?,
        ),
        None => None,
    };

    let session = context.load()?;
    let mut selection = session.select();
    if let Some(category) = category {
        selection = selection.only(category);
    }
    if let Some(text) = &args.search {
        retain_matching(&mut selection, text);
    }

    let out = context.output();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.json {
        writeln!(handle, "{}", selection.to_json()?)?;
    } else if args.tree {
        let root = build_tree(&selection, &out);
        ptree::write_tree(&root, &mut handle)
            .map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    } else {
        write_plain(&mut handle, &selection, &out)?;
    }

    Ok(())
}

/// Drop selected paths that do not contain `text`. Counts are left as the
/// engine reported them.
fn retain_matching(selection: &mut StructuredSelection, text: &str) {
    let needle = text.to_lowercase();
    for category in &mut selection.categories {
        category
            .selected
            .retain(|path| path.to_lowercase().contains(&needle));
    }
    selection.categories.retain(|c| !c.selected.is_empty());
}

fn write_plain<W: Write>(
    w: &mut W,
    selection: &StructuredSelection,
    out: &OutputConfig,
) -> io::Result<()> {
    if selection.categories.iter().all(|c| c.selected.is_empty()) {
        writeln!(w, "No resources selected.")?;
        return Ok(());
    }

    for category in selection.categories.iter().filter(|c| !c.selected.is_empty()) {
        writeln!(
            w,
            "{} {} ({})",
            emoji(out, "📁", "#"),
            heading(out, category.category.as_str()),
            category.selected.len()
        )?;
        for path in &category.selected {
            writeln!(w, "  {}", path)?;
        }
    }

    let total: usize = selection.categories.iter().map(|c| c.selected.len()).sum();
    writeln!(w)?;
    writeln!(w, "{} resource(s) selected", total)?;
    Ok(())
}

/// Intermediate tree keyed by path segment, in first-seen order.
struct Branch {
    name: String,
    children: Vec<Branch>,
}

impl Branch {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    fn insert(&mut self, segments: &[&str]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let idx = match self.children.iter().position(|c| c.name == *first) {
            Some(idx) => idx,
            None => {
                self.children.push(Branch::named(first));
                self.children.len() - 1
            }
        };
        self.children[idx].insert(rest);
    }

    fn into_node(self, out: &OutputConfig) -> TreeNode {
        let icon = if self.children.is_empty() {
            emoji(out, "📄", "")
        } else {
            emoji(out, "📁", "")
        };
        let label = if icon.is_empty() {
            self.name
        } else {
            format!("{} {}", icon, self.name)
        };
        TreeNode {
            label,
            children: self
                .children
                .into_iter()
                .map(|child| child.into_node(out))
                .collect(),
        }
    }
}

fn build_tree(selection: &StructuredSelection, out: &OutputConfig) -> TreeNode {
    let mut root = Branch::named("library");
    for category in &selection.categories {
        let mut branch = Branch::named(category.category.as_str());
        for path in &category.selected {
            let segments: Vec<&str> = path.split('/').collect();
            branch.insert(&segments);
        }
        root.children.push(branch);
    }

    let mut node = root.into_node(out);
    node.label = "library".to_string();
    node
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
