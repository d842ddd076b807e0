use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Mutex,
};

use crate::core_config::CoreConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NatPolicy {
    pub(crate) stun_server: String,
    pub(crate) ice_enabled: bool,
}

/// Handle onto the telephony engine. The SIP and media stack live behind
/// this interface; the shell only constructs the handle, toggles handler
/// delivery and re-applies the NAT policy.
#[derive(Debug)]
pub(crate) struct SipEngine {
    nat_policy: Mutex<NatPolicy>,
    nat_policy_applied: AtomicU64,
    handlers_enabled: AtomicBool,
}

impl SipEngine {
    pub(crate) fn bring_up(config: &CoreConfig) -> Result<Self, String> {
        let nat_policy = NatPolicy {
            stun_server: config.get_string("net", "stun-server", ""),
            ice_enabled: config.get_string("net", "ice", "0") == "1",
        };

        Ok(Self {
            nat_policy: Mutex::new(nat_policy),
            nat_policy_applied: AtomicU64::new(0),
            handlers_enabled: AtomicBool::new(false),
        })
    }

    pub(crate) fn nat_policy(&self) -> Result<NatPolicy, String> {
        self.nat_policy
            .lock()
            .map(|policy| policy.clone())
            .map_err(|_| "nat policy lock poisoned".to_string())
    }

    /// Applying a policy, even an unchanged one, pushes it down to the
    /// engine again. The settings window relies on this refresh on hide.
    pub(crate) fn set_nat_policy(&self, policy: NatPolicy) -> Result<(), String> {
        let mut guard = self
            .nat_policy
            .lock()
            .map_err(|_| "nat policy lock poisoned".to_string())?;
        *guard = policy;
        self.nat_policy_applied.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn nat_policy_applications(&self) -> u64 {
        self.nat_policy_applied.load(Ordering::Relaxed)
    }

    pub(crate) fn enable_handlers(&self) {
        self.handlers_enabled.store(true, Ordering::Relaxed);
    }

    #[cfg(test)]
    pub(crate) fn handlers_enabled(&self) -> bool {
        self.handlers_enabled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_config::CoreConfig;

    fn engine() -> SipEngine {
        let config = CoreConfig::load(None).expect("in-memory config");
        SipEngine::bring_up(&config).expect("engine bring-up")
    }

    #[test]
    fn nat_refresh_reapplies_the_same_policy() {
        let engine = engine();
        let before = engine.nat_policy().expect("read policy");

        engine
            .set_nat_policy(engine.nat_policy().expect("read policy"))
            .expect("apply policy");

        assert_eq!(engine.nat_policy().expect("read policy"), before);
        assert_eq!(engine.nat_policy_applications(), 1);
    }

    #[test]
    fn handlers_start_disabled() {
        let engine = engine();
        assert!(!engine.handlers_enabled());
        engine.enable_handlers();
        assert!(engine.handlers_enabled());
    }

    #[test]
    fn nat_policy_is_seeded_from_the_config() {
        let mut config = CoreConfig::load(None).expect("in-memory config");
        config.set_string("net", "stun-server", "stun.example.org");
        config.set_string("net", "ice", "1");

        let engine = SipEngine::bring_up(&config).expect("engine bring-up");
        let policy = engine.nat_policy().expect("read policy");
        assert_eq!(policy.stun_server, "stun.example.org");
        assert!(policy.ice_enabled);
    }
}
