/// Role token that disables condition evaluation and shows every row.
pub const ALL_ROLES: &str = "all";

/// Text a missing index field renders as.
pub const UNDEFINED_FIELD: &str = "undefined";

pub const INDEX_FILE_NAME: &str = "index.json";

pub const DEFAULT_BASE_URL: &str = ".";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_PAGE_EXCERPT: usize = 120;
pub const DEFAULT_NAVBAR_EXCERPT: usize = 100;

/// Status select option id → badge label.
pub const STATUS_LABELS: &[(&str, &str)] = &[("1", "active"), ("2", "draft"), ("3", "deprecated")];

/// Category select option id → phrase expected inside the card's category label.
pub const CATEGORY_PHRASES: &[(&str, &str)] = &[
    ("1", "business object"),
    ("2", "ui view"),
    ("3", "perspective"),
    ("4", "global attribute"),
];

/// Simulated position for each known role. Roles not listed hold a position named after themselves.
pub const ROLE_POSITIONS: &[(&str, &str)] = &[
    ("Captain", "Captain"),
    ("First Officer", "First Officer"),
    ("Pilot", "Pilot"),
    ("Flight Attendant", "Flight Attendant"),
    ("Ops Manager", "Manager"),
    ("Dispatcher", "Dispatcher"),
];

pub const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Business Object", "file-text"),
    ("UI View", "laptop"),
    ("Perspective", "album"),
    ("Global Attribute", "tag"),
];

pub const DEFAULT_CATEGORY_ICON: &str = "file-text";

pub fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
