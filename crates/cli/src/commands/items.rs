use clap::{Args, Subcommand};
use serde::Serialize;
use wardrobe_core::{
    ApplicationError, Category, ClothingItem, ClothingItemPatch, ItemId, NewClothingItem, Season,
    StorageError, StyleType,
};

use crate::commands::{with_application, CommandResult};

const COMMAND: &str = "item";

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    #[command(about = "Add a shirt or pant to the catalog")]
    Add(AddItemArgs),
    #[command(about = "List every item, shirts first")]
    List,
    #[command(about = "Overwrite selected fields of an item")]
    Update(UpdateItemArgs),
    #[command(about = "Remove an item from the catalog")]
    Delete { id: String },
    #[command(about = "Remove every item from the catalog")]
    Clear,
}

#[derive(Debug, Clone, Args)]
pub struct AddItemArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, help = "shirt | pant")]
    pub category: Category,
    #[arg(long, default_value = "")]
    pub color: String,
    #[arg(long = "type", default_value = "casual", help = "casual | formal | party")]
    pub style: StyleType,
    #[arg(long, default_value = "")]
    pub fabric: String,
    #[arg(long, default_value = "all", help = "all | summer | winter | spring | fall")]
    pub season: Season,
    #[arg(long, default_value = "", help = "Opaque image reference, e.g. a file URI")]
    pub image: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct UpdateItemArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long = "type")]
    pub style: Option<StyleType>,
    #[arg(long)]
    pub fabric: Option<String>,
    #[arg(long)]
    pub season: Option<Season>,
    #[arg(long)]
    pub image: Option<String>,
}

impl From<AddItemArgs> for NewClothingItem {
    fn from(args: AddItemArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            color: args.color,
            style: args.style,
            fabric: args.fabric,
            season: args.season,
            image: args.image,
        }
    }
}

impl UpdateItemArgs {
    fn patch(&self) -> ClothingItemPatch {
        ClothingItemPatch {
            name: self.name.clone(),
            category: self.category,
            color: self.color.clone(),
            style: self.style,
            fabric: self.fabric.clone(),
            season: self.season,
            image: self.image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CatalogListing {
    total: usize,
    shirts: Vec<ClothingItem>,
    pants: Vec<ClothingItem>,
}

pub fn run(command: ItemCommand) -> CommandResult {
    with_application(COMMAND, |app| async move {
        let catalog = &app.services.catalog;

        match command {
            ItemCommand::Add(args) => match catalog.add(args.into()).await {
                Some(item) => CommandResult::success_with_data(
                    COMMAND,
                    format!("added {} `{}`", item.category, item.name),
                    &item,
                ),
                None => CommandResult::from_error(
                    COMMAND,
                    &ApplicationError::Storage(StorageError::backend(
                        "catalog write was dropped; see logs",
                    )),
                ),
            },
            ItemCommand::List => {
                let wardrobe = catalog.list().await;
                let listing = CatalogListing {
                    total: wardrobe.len(),
                    shirts: wardrobe.shirts,
                    pants: wardrobe.pants,
                };
                CommandResult::success_with_data(
                    COMMAND,
                    format!("{} items in the catalog", listing.total),
                    &listing,
                )
            }
            ItemCommand::Update(args) => {
                let patch = args.patch();
                if patch.is_empty() {
                    return CommandResult::from_error(
                        COMMAND,
                        &ApplicationError::InvalidInput(
                            "pass at least one field to update".to_string(),
                        ),
                    );
                }

                let id = ItemId(args.id.trim().to_string());
                if !catalog.update(&id, patch).await {
                    return CommandResult::from_error(
                        COMMAND,
                        &ApplicationError::NotFound { kind: "item", id: id.0 },
                    );
                }
                match catalog.find(&id).await {
                    Some(item) => {
                        CommandResult::success_with_data(COMMAND, format!("updated `{id}`"), &item)
                    }
                    None => CommandResult::success(COMMAND, format!("updated `{id}`")),
                }
            }
            ItemCommand::Delete { id } => {
                let id = ItemId(id.trim().to_string());
                let removed = catalog.delete(&id).await;
                let message = if removed {
                    format!("deleted `{id}`")
                } else {
                    format!("no item `{id}`; catalog unchanged")
                };
                CommandResult::success_with_data(
                    COMMAND,
                    message,
                    &serde_json::json!({ "id": id, "removed": removed }),
                )
            }
            ItemCommand::Clear => {
                catalog.clear().await;
                CommandResult::success(COMMAND, "catalog cleared")
            }
        }
    })
}
