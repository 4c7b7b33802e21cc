// src/config/consts.rs

// Portal
pub const FOIS_URL: &str =
    "https://www.fois.indianrail.gov.in/FOISWebPortal/pages/FWP_RASIOSttnWiseOtsgDmndN.jsp";

// Station From codes, in sheet order
pub const STATION_FROM_CODES: [&str; 8] = ["BYFS", "ISCG", "FOS", "SOBK", "PBSB", "IISM", "HLSR", "SSMK"];

// Search form: (label, input name, value)
pub const FORM_FIELDS: [(&str, &str, &str); 3] = [
    ("Division", "txtDvsn", "CKP"),
    ("Cluster", "txtClst", "ALL"),
    ("Station", "txtSttn", "ALL"),
];
pub const SUBMIT_LABEL: &str = "SUBMIT";

// Table discovery
pub const TABLE_MARKER: &str = "tablesorter";
pub const KEY_HINT: &str = "STATION FROM";

// Timing
pub const LOCATE_TIMEOUT_SECS: u64 = 60;
pub const POLL_INTERVAL_MS: u64 = 1_000;
pub const WAIT_TIMEOUT_SECS: u64 = 30;
pub const NAV_SETTLE_MS: u64 = 3_000;
pub const FORM_SETTLE_MS: u64 = 1_000;

// Output
pub const DEFAULT_OUT_FILE: &str = "fois_station_from_8codes.xlsx";
pub const DEFAULT_DEBUG_FILE: &str = "fois_table_debug.html";
pub const MAX_SHEET_NAME: usize = 31;
pub const COLUMN_PADDING: usize = 2;

// Browser
pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/122.0.0.0 Safari/537.36";
