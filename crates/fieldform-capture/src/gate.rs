/*
[INPUT]:  User acknowledgement that location services are enabled
[OUTPUT]: Per-session permission gate flag
[POS]:    Session layer - blocks the form until acknowledged
[UPDATE]: When the gate gains real permission checks
*/

use tracing::info;

/// Session-scoped "location enabled" flag.
///
/// Starts closed and only ever opens. The flag is user-asserted; the real
/// permission prompt happens when coordinates are captured.
#[derive(Debug, Clone, Default)]
pub struct PermissionGate {
    location_enabled: bool,
}

impl PermissionGate {
    pub const WARNING: &'static str = "Please enable your location to proceed.";
    pub const ACKNOWLEDGE_LABEL: &'static str = "I have enabled my location";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.location_enabled
    }

    /// Open the gate. Calling it again is a no-op.
    pub fn acknowledge(&mut self) {
        if self.location_enabled {
            return;
        }
        self.location_enabled = true;
        info!("location gate acknowledged");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_starts_closed() {
        let gate = PermissionGate::new();
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_acknowledge_is_monotonic_and_idempotent() {
        let mut gate = PermissionGate::new();
        gate.acknowledge();
        assert!(gate.is_enabled());
        gate.acknowledge();
        assert!(gate.is_enabled());
    }
}
