/// Base58Check version bytes for one coin on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionBytes {
    /// Prefix of a P2PKH address payload.
    pub p2pkh: u8,
    /// Prefix of a WIF private key payload.
    pub wif: u8,
}

pub const BITCOIN_MAINNET: VersionBytes = VersionBytes {
    p2pkh: 0x00,
    wif: 0x80,
};
pub const BITCOIN_TESTNET: VersionBytes = VersionBytes {
    p2pkh: 0x6F,
    wif: 0xEF,
};
pub const LITECOIN_MAINNET: VersionBytes = VersionBytes {
    p2pkh: 0x30,
    wif: 0xB0,
};
pub const LITECOIN_TESTNET: VersionBytes = VersionBytes {
    p2pkh: 0x6F,
    wif: 0xEF,
};
pub const DOGECOIN_MAINNET: VersionBytes = VersionBytes {
    p2pkh: 0x1E,
    wif: 0x9E,
};
pub const DOGECOIN_TESTNET: VersionBytes = VersionBytes {
    p2pkh: 0x71,
    wif: 0xF1,
};

/// Bitcoin network selection for WIF export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BtcNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl BtcNetwork {
    pub fn from_testnet_flag(testnet: bool) -> Self {
        if testnet {
            BtcNetwork::Testnet
        } else {
            BtcNetwork::Mainnet
        }
    }

    pub fn version_bytes(self) -> VersionBytes {
        match self {
            BtcNetwork::Mainnet => BITCOIN_MAINNET,
            BtcNetwork::Testnet => BITCOIN_TESTNET,
        }
    }
}

impl std::fmt::Display for BtcNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BtcNetwork::Mainnet => write!(f, "mainnet"),
            BtcNetwork::Testnet => write!(f, "testnet"),
        }
    }
}
