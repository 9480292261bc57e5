use std::env;
use chrono::NaiveTime;
use chrono_tz::Tz;
use dotenvy::dotenv;

/// Must match the mount point the OpenAPI paths are written against.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Civil time zone anchoring all day-boundary and lateness computations.
    pub report_tz: Tz,
    /// Check-ins after this local wall-clock time count as late.
    pub cutoff_time: NaiveTime,
    /// Staff blocks per printed A4 page.
    pub report_page_size: usize,

    // Rate limiting
    pub rate_report_per_min: u32,
    pub rate_attendance_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            report_tz: env::var("REPORT_TIMEZONE")
                .unwrap_or_else(|_| "Asia/Kuala_Lumpur".to_string())
                .parse()
                .expect("REPORT_TIMEZONE must be a valid IANA zone name"),

            // Staging runs with CUTOFF_TIME=10:30
            cutoff_time: NaiveTime::parse_from_str(
                &env::var("CUTOFF_TIME").unwrap_or_else(|_| "09:30".to_string()),
                "%H:%M",
            )
            .expect("CUTOFF_TIME must be HH:MM"),

            report_page_size: env::var("REPORT_PAGE_SIZE")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap(),

            rate_report_per_min: env::var("RATE_REPORT_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_attendance_per_min: env::var("RATE_ATTENDANCE_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
        }
    }
}
