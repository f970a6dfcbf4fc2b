use clap::{Parser, Subcommand};

/// Command-line interface definition for pictoplan
/// Visual schedules with pictograms, periods and rewards
#[derive(Parser)]
#[command(
    name = "pictoplan",
    version = env!("CARGO_PKG_VERSION"),
    about = "A pictogram-based visual schedule planner: weekly routines, rewards and child mode",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show or switch the mode (adult / child)
    Mode {
        /// `adult` or `child`; omit to print the current mode
        target: Option<String>,

        #[arg(long = "pin", help = "PIN required to go back to adult mode")]
        pin: Option<String>,
    },

    /// Show the week containing a date
    Week {
        /// Any day of the week (YYYY-MM-DD, today, tomorrow…); default today
        date: Option<String>,

        #[arg(
            long = "offset",
            allow_hyphen_values = true,
            help = "Move N weeks forward (negative: backward)"
        )]
        offset: Option<i64>,
    },

    /// Show one day with progress and rewards
    Day {
        /// Day (YYYY-MM-DD, today, tomorrow…); default today
        date: Option<String>,

        #[arg(long = "speak", help = "Read the activities aloud")]
        speak: bool,
    },

    /// Add an activity to a day
    Add {
        /// Day of the activity (YYYY-MM-DD)
        date: String,

        /// Pictogram id or label
        picto: String,

        #[arg(long = "time", help = "Time of day (HH:MM)")]
        time: Option<String>,

        #[arg(long = "period", help = "morning | afternoon | evening (default: from time or config)")]
        period: Option<String>,

        #[arg(long = "label", help = "Custom label shown instead of the pictogram's")]
        label: Option<String>,

        #[arg(long = "notes", help = "Free-text notes")]
        notes: Option<String>,
    },

    /// Mark an activity done / not done
    Toggle {
        date: String,

        /// Position in the day (1-based) or activity id prefix
        activity: String,
    },

    /// Edit fields of an activity
    Edit {
        date: String,

        /// Position in the day (1-based) or activity id prefix
        activity: String,

        #[arg(long = "picto", help = "New pictogram id or label")]
        picto: Option<String>,

        #[arg(long = "time", help = "New time (HH:MM)", conflicts_with = "no_time")]
        time: Option<String>,

        #[arg(long = "no-time", help = "Remove the time")]
        no_time: bool,

        #[arg(long = "period")]
        period: Option<String>,

        #[arg(long = "label", help = "Custom label (empty string clears it)")]
        label: Option<String>,

        #[arg(long = "notes", help = "Notes (empty string clears them)")]
        notes: Option<String>,
    },

    /// Move an activity up or down within its day
    Move {
        date: String,

        activity: String,

        #[arg(long = "up", conflicts_with = "down")]
        up: bool,

        #[arg(long = "down")]
        down: bool,
    },

    /// Delete an activity
    Del {
        date: String,

        activity: String,
    },

    /// Remove every activity of a day
    Clear {
        date: String,
    },

    /// Copy a day's activities onto another day
    Copy {
        /// Source day
        from: String,

        /// Destination day; omit to list valid destinations in the week
        to: Option<String>,
    },

    /// Routine templates
    Routine {
        #[command(subcommand)]
        action: RoutineAction,
    },

    /// Pictogram library
    Picto {
        #[command(subcommand)]
        action: PictoAction,
    },

    /// People and places
    People {
        #[command(subcommand)]
        action: PeopleAction,
    },

    /// View or change settings
    Settings {
        #[arg(long = "high-contrast")]
        high_contrast: Option<bool>,

        #[arg(long = "show-text")]
        show_text: Option<bool>,

        #[arg(long = "voice")]
        voice: Option<bool>,

        #[arg(long = "auto-speak")]
        auto_speak: Option<bool>,

        #[arg(long = "voice-language", help = "Speech language tag, e.g. es-ES")]
        voice_language: Option<String>,
    },

    /// PIN management
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },

    /// Rewards for a period of a day
    Reward {
        #[command(subcommand)]
        action: RewardAction,
    },

    /// Build a day from free text or a generated routine
    Create {
        date: String,

        #[arg(long = "text", help = "Items separated by lines or commas, e.g. \"08:00 Desayuno, Cole\"")]
        text: Option<String>,

        #[arg(long = "from-file", help = "Read the free text from a file")]
        from_file: Option<String>,

        #[arg(long = "generated", help = "JSON file with generated routine items")]
        generated: Option<String>,

        #[arg(long = "prompt", default_value = "", help = "Prompt passed to the generator")]
        prompt: String,

        #[arg(long = "period", help = "Period for items without time or section")]
        period: Option<String>,
    },

    /// Write a backup of every collection
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a zip archive")]
        compress: bool,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },

    /// Restore every collection from a backup
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Save a day (or one period of it) as a template
    Save {
        date: String,

        #[arg(long = "name")]
        name: String,

        #[arg(long = "description", default_value = "")]
        description: String,

        #[arg(long = "period")]
        period: Option<String>,
    },

    /// Append a template to a day
    Apply {
        /// Template name or id
        routine: String,

        date: String,

        #[arg(long = "period", help = "Period stamped on the copied activities")]
        period: String,
    },

    /// List saved templates
    List,

    /// Delete a template
    Del { routine: String },

    /// Write a template as a portable JSON document
    Export {
        routine: String,

        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Read a template document
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "with-pictograms", help = "Add the pictograms it carries that are missing locally")]
        with_pictograms: bool,
    },
}

#[derive(Subcommand)]
pub enum PictoAction {
    /// List or search pictograms
    List {
        #[arg(long = "search")]
        search: Option<String>,

        #[arg(long = "category")]
        category: Option<String>,
    },

    /// Add a pictogram by hand
    Add {
        label: String,

        #[arg(long = "icon", conflicts_with_all = ["catalog", "image"])]
        icon: Option<String>,

        #[arg(long = "catalog", conflicts_with = "image", help = "External catalog id")]
        catalog: Option<u32>,

        #[arg(long = "image", help = "Image URL or data URI")]
        image: Option<String>,

        #[arg(long = "category")]
        category: Option<String>,
    },

    /// Import a catalog image (idempotent per catalog id)
    Import {
        catalog_id: u32,

        label: String,

        #[arg(long = "category")]
        category: Option<String>,
    },

    /// Change label or image of a pictogram
    Edit {
        id: String,

        #[arg(long = "label")]
        label: Option<String>,

        #[arg(long = "icon", conflicts_with_all = ["catalog", "image"])]
        icon: Option<String>,

        #[arg(long = "catalog", conflicts_with = "image")]
        catalog: Option<u32>,

        #[arg(long = "image")]
        image: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PeopleAction {
    /// List people and places
    List {
        #[arg(long = "kind", help = "person | place")]
        kind: Option<String>,
    },

    Add {
        name: String,

        #[arg(long = "kind", default_value = "person")]
        kind: String,

        #[arg(long = "image", help = "Image URL; a generated avatar is used when missing")]
        image: Option<String>,

        #[arg(long = "description")]
        description: Option<String>,
    },

    Edit {
        id: String,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "image")]
        image: Option<String>,

        #[arg(long = "description", help = "Empty string clears it")]
        description: Option<String>,
    },

    Del { id: String },
}

#[derive(Subcommand)]
pub enum PinAction {
    /// Set a new 4-digit PIN
    Set { pin: String },

    /// Set the PIN recovery question
    Question {
        #[arg(long = "question")]
        question: String,

        #[arg(long = "answer")]
        answer: String,
    },

    /// Show the PIN after answering the security question
    Recover {
        #[arg(long = "answer")]
        answer: String,
    },
}

#[derive(Subcommand)]
pub enum RewardAction {
    /// Define the reward of a period
    Set {
        date: String,

        #[arg(long = "period")]
        period: String,

        #[arg(long = "label")]
        label: String,

        #[arg(long = "emoji", default_value = "⭐")]
        emoji: String,

        #[arg(long = "image")]
        image: Option<String>,
    },

    /// Remove the reward of a period
    Del {
        date: String,

        #[arg(long = "period")]
        period: String,
    },

    /// Redeem an unlocked reward
    Redeem {
        date: String,

        #[arg(long = "period")]
        period: String,
    },
}
