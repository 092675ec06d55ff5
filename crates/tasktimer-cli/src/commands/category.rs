//! Category management commands.

use clap::Subcommand;
use tasktimer_core::{Category, Color, CoreError, Database, TaskStore};

use super::Context;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Color as #RRGGBB or #AARRGGBB; defaults to the next palette color
        #[arg(long)]
        color: Option<String>,
        /// Icon name
        #[arg(long)]
        icon: Option<String>,
    },
    /// List categories
    List,
    /// Rename or recolor a category
    Edit {
        /// Category ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category; its tasks become uncategorised
    Delete {
        /// Category ID
        id: String,
    },
}

fn category_line(category: &Category) -> String {
    let icon = category
        .icon
        .as_deref()
        .map(|i| format!("  [{i}]"))
        .unwrap_or_default();
    format!("{}  {}  {}{icon}", category.color, category.name, category.id)
}

pub fn run(action: CategoryAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;

    match action {
        CategoryAction::Add { name, color, icon } => {
            let color = match color {
                Some(c) => c.parse()?,
                None => Color::nth_palette(db.list_categories()?.len()),
            };
            let category = db.add_category(&name, color, icon)?;
            ctx.emit(&category, |c| format!("Category created: {}", c.id))?;
        }
        CategoryAction::List => {
            let categories = db.list_categories()?;
            ctx.emit(&categories, |list| {
                if list.is_empty() {
                    return "no categories".to_string();
                }
                list.iter().map(category_line).collect::<Vec<_>>().join("\n")
            })?;
        }
        CategoryAction::Edit { id, name, color } => {
            let current = db
                .list_categories()?
                .into_iter()
                .find(|c| c.id == id)
                .ok_or_else(|| CoreError::category_not_found(&id))?;
            let name = name.unwrap_or(current.name);
            let color = match color {
                Some(c) => c.parse()?,
                None => current.color,
            };
            let category = db.update_category(&id, &name, color)?;
            ctx.emit(&category, |c| format!("Category updated: {}", c.id))?;
        }
        CategoryAction::Delete { id } => {
            let detached = db.delete_category(&id)?;
            ctx.emit(
                &serde_json::json!({ "id": id, "detached_tasks": detached }),
                |_| format!("Category deleted: {id} ({detached} tasks uncategorised)"),
            )?;
        }
    }
    Ok(())
}
