// ABOUTME: Garmin Connect API constants for workouts, SSO login and OAuth token exchange
// ABOUTME: Step type ids, target type ids, endpoint paths and client user agents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default Garmin domain (`garmin.cn` serves the China region)
pub const DEFAULT_DOMAIN: &str = "garmin.com";

/// User agent sent to the Connect API
pub const CONNECT_USER_AGENT: &str = "GCM-iOS-5.7.2.1";

/// User agent sent to SSO and OAuth endpoints
pub const SSO_USER_AGENT: &str = "com.garmin.android.apps.connectmobile";

/// Published OAuth1 consumer key pair used by the mobile app
pub const OAUTH_CONSUMER_URL: &str = "https://thegarth.s3.amazonaws.com/oauth_consumer.json";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Endpoint paths relative to `https://connectapi.<domain>`
pub mod endpoints {
    /// Workout list
    pub const WORKOUTS: &str = "workout-service/workouts";
    /// Single workout, suffixed with `/{id}`
    pub const WORKOUT: &str = "workout-service/workout";
    /// Profile of the logged-in user
    pub const SOCIAL_PROFILE: &str = "userprofile-service/socialProfile";
    /// SSO ticket to OAuth1 token exchange
    pub const OAUTH_PREAUTHORIZED: &str = "oauth-service/oauth/preauthorized";
    /// OAuth1 to OAuth2 token exchange
    pub const OAUTH_EXCHANGE: &str = "oauth-service/oauth/exchange/user/2.0";
}

/// Garmin workout step type identifiers (`stepType.stepTypeId`)
pub mod step_types {
    /// Warmup step
    pub const WARMUP_ID: u32 = 1;
    /// Cooldown step
    pub const COOLDOWN_ID: u32 = 2;
    /// Interval (work) step
    pub const INTERVAL_ID: u32 = 3;
    /// Recovery step between intervals
    pub const RECOVERY_ID: u32 = 4;
    /// Rest step (standing still)
    pub const REST_ID: u32 = 5;
    /// Repeat group container
    pub const REPEAT_ID: u32 = 6;
    /// Uncategorised step
    pub const OTHER_ID: u32 = 7;
}

/// Garmin workout target type identifiers (`targetType.workoutTargetTypeId`)
pub mod target_types {
    /// Step carries no target
    pub const NO_TARGET_ID: u32 = 1;
    /// Heart rate zone target
    pub const HEART_RATE_ZONE_ID: u32 = 4;
    /// Key paired with [`HEART_RATE_ZONE_ID`]
    pub const HEART_RATE_ZONE_KEY: &str = "heart.rate.zone";
}
