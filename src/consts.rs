pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Constants for the dashboard client, grouped by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the channel carrying completed requests back to the UI loop.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // DISPLAY CONFIGURATION
    // =============================================================================

    /// Number of history entries shown in the Recent Uploads table.
    pub const HISTORY_DISPLAY_LIMIT: usize = 5;

    /// Title shown in the header and on the splash screen.
    pub const APP_TITLE: &str = "Chemical Equipment Visualizer";

    /// Label of the distribution chart.
    pub const CHART_LABEL: &str = "Equipment Type Distribution";

    // =============================================================================
    // USER-FACING ALERTS
    // =============================================================================

    pub mod alerts {
        /// Shown when the upload is triggered with no file selected.
        pub const NO_FILE_SELECTED: &str = "Please select a file.";

        /// Shown for every upload failure, whatever the cause.
        pub const UPLOAD_FAILED: &str = "Upload failed: Unauthorized or Server Error";

        /// Shown for every report export failure.
        pub const REPORT_FAILED: &str = "Failed to generate report";
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Remote API endpoints and payload conventions
    pub mod api {
        use std::time::Duration;

        /// Development default for the API base URL.
        pub const DEFAULT_API_URL: &str = "http://localhost:8000";

        /// History (GET) and upload (POST) endpoint.
        pub const UPLOAD_ENDPOINT: &str = "api/upload/";

        /// PDF export endpoint.
        pub const EXPORT_PDF_ENDPOINT: &str = "api/export-pdf/";

        /// Multipart field carrying the CSV file.
        pub const UPLOAD_FIELD_NAME: &str = "file";

        /// File name the exported report is saved under.
        pub const REPORT_FILE_NAME: &str = "Equipment_Report.pdf";

        /// Time allowed for establishing a connection
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Time allowed for a full request, server-side analysis included
        pub const REQUEST_TIMEOUT_SECS: u64 = 120;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // ENVIRONMENT VARIABLES
    // =============================================================================

    pub mod env_vars {
        pub const API_URL: &str = "API_URL";
        pub const API_USERNAME: &str = "API_USERNAME";
        pub const API_PASSWORD: &str = "API_PASSWORD";
    }
}
