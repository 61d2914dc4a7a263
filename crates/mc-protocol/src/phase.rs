/// The current stage of a connection's conversation. Selects which
/// registry table is active for the *next* frame in each direction.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Phase {
    Handshake,
    Status,
    Login,
    Configuration,
    Play,
}

/// A transition a packet can trigger, applied by the connection driver
/// after the triggering packet has been delivered to the consumer (never
/// before, since the packet itself was parsed under the old phase).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Transition {
    /// Handshake's `next_state` field selects Status or Login.
    ToStatus,
    ToLogin,
    /// Login completes (`LoginAcknowledged`/`LoginSuccess` exchange).
    ToConfiguration,
    /// `FinishConfiguration` (clientbound) paired with its serverbound ack.
    ToPlay,
    /// `StartConfiguration` (clientbound) paired with its serverbound ack,
    /// returning to CONFIGURATION from PLAY.
    BackToConfiguration,
}

impl Phase {
    /// Applies a transition, returning the new phase. Panics on a
    /// transition that doesn't apply from `self`; the registry only ever
    /// offers packets whose transition is valid for the phase they were
    /// decoded in, so this should be unreachable in practice.
    #[must_use]
    pub fn apply(self, transition: Transition) -> Phase {
        match (self, transition) {
            (Phase::Handshake, Transition::ToStatus) => Phase::Status,
            (Phase::Handshake, Transition::ToLogin) => Phase::Login,
            (Phase::Login, Transition::ToConfiguration) => Phase::Configuration,
            (Phase::Configuration, Transition::ToPlay) => Phase::Play,
            (Phase::Play, Transition::BackToConfiguration) => Phase::Configuration,
            (phase, transition) => {
                panic!("phase transition {transition:?} does not apply from {phase:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_to_play_round_trips_back() {
        let phase = Phase::Configuration.apply(Transition::ToPlay);
        assert_eq!(phase, Phase::Play);
        assert_eq!(phase.apply(Transition::BackToConfiguration), Phase::Configuration);
    }

    #[test]
    #[should_panic]
    fn invalid_transition_panics() {
        Phase::Status.apply(Transition::ToPlay);
    }
}
