//! # Movement Control Contract
//!
//! The viewer rig's movement controller belongs to the host engine; the
//! collision guard only needs a way to suspend and release it. Hosts report
//! which control operations they actually support through
//! [`ControlCapabilities`], and the guard picks one [`ControlStrategy`] at
//! setup instead of probing every frame. Any subset of the operations may be
//! absent, including all of them.

/// Which control operations a [`MovementControl`] implementation honors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlCapabilities {
    /// `pause()` / `resume()` stop and restart input processing
    pub pause_resume: bool,
    /// `set_enabled()` toggles the controller wholesale
    pub enabled_flag: bool,
    /// `zero_velocity()` clears any residual motion
    pub velocity: bool,
}

/// Host-implemented handle to the viewer's movement controller.
///
/// Implement the operations your controller genuinely supports and report
/// them in [`capabilities`](Self::capabilities); the rest keep their no-op
/// defaults.
pub trait MovementControl {
    fn capabilities(&self) -> ControlCapabilities;

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn set_enabled(&mut self, _enabled: bool) {}

    fn zero_velocity(&mut self) {}
}

/// How the guard suspends movement, chosen once from the controller's
/// capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStrategy {
    /// Pause on block, resume on clear
    PauseResume,
    /// Zero velocity and disable on block, re-enable on clear
    EnabledFlag,
    /// Zero velocity on block; motion resumes by itself
    VelocityOnly,
}

impl ControlStrategy {
    /// Picks the strongest strategy the controller supports, or `None` when
    /// it supports nothing (the guard then tracks state without acting).
    pub fn select(caps: ControlCapabilities) -> Option<Self> {
        if caps.pause_resume {
            Some(Self::PauseResume)
        } else if caps.enabled_flag {
            Some(Self::EnabledFlag)
        } else if caps.velocity {
            Some(Self::VelocityOnly)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_prefers_pause_resume() {
        let caps = ControlCapabilities {
            pause_resume: true,
            enabled_flag: true,
            velocity: true,
        };
        assert_eq!(ControlStrategy::select(caps), Some(ControlStrategy::PauseResume));
    }

    #[test]
    fn test_strategy_falls_back_in_order() {
        let caps = ControlCapabilities {
            pause_resume: false,
            enabled_flag: true,
            velocity: true,
        };
        assert_eq!(ControlStrategy::select(caps), Some(ControlStrategy::EnabledFlag));

        let caps = ControlCapabilities {
            pause_resume: false,
            enabled_flag: false,
            velocity: true,
        };
        assert_eq!(ControlStrategy::select(caps), Some(ControlStrategy::VelocityOnly));
    }

    #[test]
    fn test_no_capabilities_yields_no_strategy() {
        assert_eq!(ControlStrategy::select(ControlCapabilities::default()), None);
    }
}
