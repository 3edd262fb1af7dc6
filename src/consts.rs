pub mod cli_consts {
    //! Console Configuration Constants
    //!
    //! All tunables of the console, grouped by functional area.

    use std::time::Duration;

    // =============================================================================
    // SERVER
    // =============================================================================

    /// Server used when nothing else is configured.
    pub const LOCAL_SERVER_URL: &str = "http://localhost:5000";

    /// Path prefix of every REST endpoint.
    pub const API_BASE_PATH: &str = "/api";

    /// Environment variable overriding the server URL.
    pub const API_URL_ENV: &str = "HOTELSAT_API_URL";

    /// Timeout for establishing a connection to the server.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for a full request, including the body of an Excel export.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    // =============================================================================
    // UI
    // =============================================================================

    /// How long a notification stays on screen unless dismissed.
    pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

    /// Upper bound on notifications drawn at once; older ones stay queued.
    pub const MAX_VISIBLE_NOTIFICATIONS: usize = 4;

    /// Capacity of the channel carrying fetch results back to the UI loop.
    pub const UPDATE_QUEUE_SIZE: usize = 100;

    /// Time the splash screen is shown before the dashboard.
    pub const SPLASH_DURATION: Duration = Duration::from_millis(1200);

    /// Input polling interval of the UI loop.
    pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

    /// Upper bound of every satisfaction rating.
    pub const MAX_RATING: f64 = 5.0;

    /// Days covered by a temporal analysis unless asked otherwise.
    pub const DEFAULT_TREND_PERIOD_DAYS: u32 = 30;

    /// Fewest hotels a comparison accepts.
    pub const MIN_COMPARED_HOTELS: usize = 2;

    // =============================================================================
    // FILES
    // =============================================================================

    /// Directory under $HOME holding the config file and the log.
    pub const CONFIG_DIR_NAME: &str = ".hotelsat";

    /// Name of the log file written in TUI mode.
    pub const LOG_FILE_NAME: &str = "hotelsat-admin.log";

    /// Default directory for exported spreadsheets and chart images.
    pub const DEFAULT_EXPORT_DIR: &str = "hotelsat-exports";

    /// Subdirectory of the export directory receiving chart images.
    pub const CHARTS_DIR_NAME: &str = "charts";
}
