use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cms", about = "CMS RS asset and menu tooling", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the asset listing query for a filter state
    Assets {
        #[command(flatten)]
        filter: FilterArgs,

        /// Run the query against DATABASE_URL and print the rows
        #[arg(long)]
        execute: bool,
    },

    /// List the permission actions evaluated for a component
    Actions {
        /// Component name, e.g. com_content
        #[arg(long)]
        component: Option<String>,
    },

    /// Delete a menu item and clean up module assignments
    DeleteMenuItem {
        /// Menu item id
        id: i64,

        /// Delete the whole subtree instead of promoting the children
        #[arg(long)]
        children: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Substring to match against asset name and title
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Lowest tree level to include
    #[arg(long, default_value_t = 0)]
    pub level_start: i32,

    /// Highest tree level to include
    #[arg(long, default_value_t = 0)]
    pub level_end: i32,

    /// Restrict to one component and its sub-assets
    #[arg(long, short = 'c')]
    pub component: Option<String>,

    /// Group whose permissions are debugged
    #[arg(long, short = 'g', default_value_t = 0)]
    pub group: i64,

    /// Ordering column (a.title, a.name, a.lft, a.id, a.level)
    #[arg(long, default_value = "a.lft")]
    pub ordering: String,

    /// Ordering direction (asc, desc)
    #[arg(long, default_value = "asc")]
    pub direction: String,

    /// Row offset
    #[arg(long, default_value_t = 0)]
    pub start: i64,

    /// Page size, 0 for all rows (defaults to CMS_LIST_LIMIT)
    #[arg(long)]
    pub limit: Option<i64>,

    /// Columns to select, comma separated (id, name, title, level, lft, rgt)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}
