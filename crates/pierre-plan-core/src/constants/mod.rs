// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Profile defaults, unit conversion factors, and generation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large namespace.

/// Defaults applied when a profile field is absent
pub mod profile_defaults {
    /// Daily calorie target used when the caller omits one
    pub const CALORIE_TARGET: u32 = 2200;
    /// Training days per week used when the caller omits one
    pub const DAYS_PER_WEEK: u8 = 4;
    /// Marker rendered for an empty string set
    pub const EMPTY_SET_MARKER: &str = "none";
    /// Marker rendered for an absent scalar field
    pub const UNSPECIFIED_MARKER: &str = "unspecified";
}

/// Unit conversion factors
pub mod units {
    /// Kilograms per pound
    pub const KG_PER_LB: f64 = 0.453_592_37;
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Inches per foot
    pub const INCHES_PER_FOOT: f64 = 12.0;
}

/// Plan shape limits
pub mod plan_limits {
    /// Minimum number of days in a plan and lowest valid day index
    pub const MIN_DAY: u8 = 1;
    /// Maximum number of days in a plan and highest valid day index
    pub const MAX_DAY: u8 = 7;
}

/// Defaults for the LLM generation pipeline
pub mod generation {
    /// Model identifier used when none is configured
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    /// Completion API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// Per-attempt deadline, kept under typical serverless execution ceilings
    pub const DEFAULT_TIMEOUT_MS: u64 = 9000;
    /// Output size bound for each completion
    pub const DEFAULT_MAX_TOKENS: u32 = 3500;
    /// Creative temperature for the first attempt
    pub const FIRST_ATTEMPT_TEMPERATURE: f32 = 0.8;
    /// Lower temperature for the strict retry
    pub const RETRY_TEMPERATURE: f32 = 0.4;
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Service identifiers used in logs
pub mod service_names {
    /// Name of the plan server binary
    pub const PIERRE_PLAN_SERVER: &str = "pierre-plan-server";
}

/// Nutrition arithmetic shared by the prompt rules and the fallback plan
pub mod nutrition {
    /// Breakfast, lunch, dinner share of daily kcal, in percent
    pub const MEAL_SPLIT_PERCENT: [u32; 3] = [25, 40, 35];
    /// Share of kcal from protein
    pub const PROTEIN_SHARE: f64 = 0.30;
    /// Share of kcal from carbohydrate
    pub const CARB_SHARE: f64 = 0.40;
    /// Share of kcal from fat
    pub const FAT_SHARE: f64 = 0.30;
    /// kcal per gram of protein
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// kcal per gram of carbohydrate
    pub const KCAL_PER_G_CARB: f64 = 4.0;
    /// kcal per gram of fat
    pub const KCAL_PER_G_FAT: f64 = 9.0;
    /// Allowed deviation of daily meal kcal from the target
    pub const CALORIE_TOLERANCE: f64 = 0.10;
}

/// Thresholds for the recovery-day rule
pub mod recovery {
    /// Nightly sleep below this many hours warrants a recovery day
    pub const MIN_RESTFUL_SLEEP_HOURS: f64 = 7.0;
    /// Stress levels that warrant a recovery day
    pub const HIGH_STRESS_LEVELS: [&str; 3] = ["high", "very high", "severe"];
}
