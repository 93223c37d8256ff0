//! Startup-time network selection.
//!
//! All three parameter sets are built eagerly; selection only repoints the
//! active entry. Selection happens once, on the startup thread, before any
//! worker that reads the parameters is spawned. `finish` hands the chosen
//! set off as an `Arc` and drops the registry, so nothing can reselect
//! while readers are running.

use std::collections::BTreeMap;
use std::sync::Arc;

use delorean_core::error::ParamsError;
use delorean_core::types::NetworkKind;
use tracing::{error, info};

use crate::params::ChainParams;

/// The two command-line switches that pick a network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkFlags {
    pub testnet: bool,
    pub regtest: bool,
}

impl NetworkFlags {
    pub fn new(testnet: bool, regtest: bool) -> Self {
        Self { testnet, regtest }
    }

    /// Regtest wins over test, test over main; both at once is an error.
    pub fn network(&self) -> Result<NetworkKind, ParamsError> {
        match (self.testnet, self.regtest) {
            (true, true) => Err(ParamsError::ConflictingNetworkFlags),
            (_, true) => Ok(NetworkKind::Regtest),
            (true, false) => Ok(NetworkKind::Test),
            (false, false) => Ok(NetworkKind::Main),
        }
    }
}

/// Holds every built `ChainParams` and which one is active.
#[derive(Debug)]
pub struct NetworkRegistry {
    networks: BTreeMap<NetworkKind, Arc<ChainParams>>,
    active: NetworkKind,
    selected: bool,
}

impl NetworkRegistry {
    /// Build and verify the parameters of every network, each exactly once.
    /// Main is active until something is selected.
    pub fn build() -> Result<Self, ParamsError> {
        Self::from_params(ChainParams::build_all()?)
    }

    /// Register already-built parameter sets. Main must be among them since
    /// it is the default.
    pub fn from_params(params: impl IntoIterator<Item = ChainParams>) -> Result<Self, ParamsError> {
        let networks: BTreeMap<NetworkKind, Arc<ChainParams>> = params
            .into_iter()
            .map(|p| (p.network, Arc::new(p)))
            .collect();
        if !networks.contains_key(&NetworkKind::Main) {
            return Err(ParamsError::UnimplementedNetwork(
                NetworkKind::Main.to_string(),
            ));
        }
        Ok(Self {
            networks,
            active: NetworkKind::Main,
            selected: false,
        })
    }

    /// Make `kind` the active network.
    pub fn select(&mut self, kind: NetworkKind) -> Result<&ChainParams, ParamsError> {
        if !self.networks.contains_key(&kind) {
            error!(network = %kind, "unimplemented network");
            return Err(ParamsError::UnimplementedNetwork(kind.to_string()));
        }
        self.active = kind;
        self.selected = true;
        info!(network = %kind, "selected chain parameters");
        Ok(self.current())
    }

    /// Select from the `-testnet` / `-regtest` switches. On a conflict the
    /// active network is left as it was.
    pub fn select_from_flags(&mut self, flags: NetworkFlags) -> Result<NetworkKind, ParamsError> {
        let kind = flags.network().map_err(|e| {
            error!(testnet = flags.testnet, regtest = flags.regtest, "{e}");
            e
        })?;
        self.select(kind)?;
        Ok(kind)
    }

    pub fn current(&self) -> &ChainParams {
        &self.networks[&self.active]
    }

    pub fn active(&self) -> NetworkKind {
        self.active
    }

    /// Whether `select` has run, as opposed to the Main default.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn get(&self, kind: NetworkKind) -> Option<&ChainParams> {
        self.networks.get(&kind).map(Arc::as_ref)
    }

    /// Consume the registry, keeping only the active parameters.
    pub fn finish(mut self) -> Arc<ChainParams> {
        // `from_params` guarantees the active key is present.
        let active = self.active;
        self.networks
            .remove(&active)
            .unwrap_or_else(|| unreachable!("active network {active} is registered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(kind: NetworkKind) -> ChainParams {
        ChainParams::build_with(kind, 1_700_000_000, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    fn full_registry() -> NetworkRegistry {
        let all = ChainParams::build_all_with(1_700_000_000, &mut StdRng::seed_from_u64(5)).unwrap();
        NetworkRegistry::from_params(all).unwrap()
    }

    #[test]
    fn defaults_to_main() {
        let registry = full_registry();
        assert_eq!(registry.active(), NetworkKind::Main);
        assert!(!registry.is_selected());
        assert_eq!(registry.current().default_port, 20005);
    }

    #[test]
    fn flags_pick_the_network() {
        let cases = [
            (false, false, NetworkKind::Main),
            (true, false, NetworkKind::Test),
            (false, true, NetworkKind::Regtest),
        ];
        for (testnet, regtest, expected) in cases {
            let mut registry = full_registry();
            let kind = registry
                .select_from_flags(NetworkFlags::new(testnet, regtest))
                .unwrap();
            assert_eq!(kind, expected);
            assert_eq!(registry.current().network_id(), expected);
            assert!(registry.is_selected());
        }
    }

    #[test]
    fn conflicting_flags_leave_selection_alone() {
        let mut registry = full_registry();
        registry.select(NetworkKind::Test).unwrap();
        let err = registry
            .select_from_flags(NetworkFlags::new(true, true))
            .unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(registry.active(), NetworkKind::Test);
    }

    #[test]
    fn unregistered_network_is_rejected() {
        let mut registry = NetworkRegistry::from_params([params(NetworkKind::Main)]).unwrap();
        let err = registry.select(NetworkKind::Regtest).unwrap_err();
        assert!(matches!(err, ParamsError::UnimplementedNetwork(_)));
        assert_eq!(registry.active(), NetworkKind::Main);
        assert!(registry.get(NetworkKind::Regtest).is_none());
    }

    #[test]
    fn main_is_required() {
        let err = NetworkRegistry::from_params([params(NetworkKind::Test)]).unwrap_err();
        assert!(matches!(err, ParamsError::UnimplementedNetwork(_)));
    }

    #[test]
    fn finish_returns_the_active_set() {
        let mut registry = full_registry();
        registry.select(NetworkKind::Regtest).unwrap();
        let active = registry.finish();
        assert_eq!(active.network_id(), NetworkKind::Regtest);
        assert_eq!(active.default_port, 18444);
    }
}
