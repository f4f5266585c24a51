// liminal-core/src/runtime/policy.rs
// ============================================================================
// Module: Liminal Execution Policy
// Description: The kill-switch and submission/private-rail policy bits.
// Purpose: Provide a single, fail-closed source of truth every gate consults.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Every bit here defaults closed: an unset environment variable means the
//! kill-switch is disengaged and submission/the private rail are permitted,
//! but any parse failure or explicit `"1"`/`"true"` value for the kill-switch
//! wins immediately. There is no "undefined means permit the kill-switch".

// ============================================================================
// SECTION: Execution Policy
// ============================================================================

/// The process-wide safety policy bits every gate consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionPolicy {
    /// When engaged, every submission gate check fails regardless of anything else.
    kill_switch_engaged: bool,
    /// Whether the private rail may be used at all.
    private_rail_enabled: bool,
    /// Whether submission is permitted at all.
    submission_enabled: bool,
}

impl ExecutionPolicy {
    /// Builds a policy from explicit bits.
    #[must_use]
    pub const fn new(kill_switch_engaged: bool, private_rail_enabled: bool, submission_enabled: bool) -> Self {
        Self {
            kill_switch_engaged,
            private_rail_enabled,
            submission_enabled,
        }
    }

    /// The default, fully-permissive policy: nothing disabled.
    #[must_use]
    pub const fn permissive() -> Self {
        Self::new(false, true, true)
    }

    /// A policy with every bit locked down, for tests exercising denial paths.
    #[must_use]
    pub const fn locked_down() -> Self {
        Self::new(true, false, false)
    }

    /// Reads the policy from environment variables. An unset variable takes
    /// its fail-closed default (kill-switch disengaged, rail and submission
    /// enabled); a variable that is set but not a recognized truthy string is
    /// treated as `false` regardless of which default that overrides, so a
    /// malformed value for `LIMINAL_PRIVATE_RAIL_ENABLED` disables the rail
    /// rather than silently falling back to enabled.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            env_flag("LIMINAL_KILL_SWITCH", false),
            env_flag("LIMINAL_PRIVATE_RAIL_ENABLED", true),
            env_flag("LIMINAL_SUBMISSION_ENABLED", true),
        )
    }

    /// Whether the kill-switch is engaged.
    #[must_use]
    pub const fn kill_switch_engaged(&self) -> bool {
        self.kill_switch_engaged
    }

    /// Whether the private rail is enabled by policy.
    #[must_use]
    pub const fn private_rail_enabled(&self) -> bool {
        self.private_rail_enabled
    }

    /// Whether submission is enabled by policy.
    #[must_use]
    pub const fn submission_enabled(&self) -> bool {
        self.submission_enabled
    }

    /// Engages the kill-switch, returning the updated policy.
    #[must_use]
    pub const fn with_kill_switch_engaged(mut self) -> Self {
        self.kill_switch_engaged = true;
        self
    }

    /// Disables the private rail, returning the updated policy.
    #[must_use]
    pub const fn with_private_rail_disabled(mut self) -> Self {
        self.private_rail_enabled = false;
        self
    }

    /// Disables submission, returning the updated policy.
    #[must_use]
    pub const fn with_submission_disabled(mut self) -> Self {
        self.submission_enabled = false;
        self
    }
}

/// Reads a boolean environment variable. Unset falls back to `default`; set
/// but not a recognized truthy string resolves to `false`.
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(value.trim(), "1" | "true" | "TRUE" | "True"),
        Err(_) => default,
    }
}
