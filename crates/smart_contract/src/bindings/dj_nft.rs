// Copyright (C) 2024-2025 The Market Project.
//
// dj_nft.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Reward NFT contract: mints a collectible to whoever claims it.

use crate::{ContractSpec, MethodSpec, ParameterSpec, ScType};

pub const CONTRACT_NAME: &str = "dj_nft";

pub const AWARD_ITEM: &str = "award_item";

pub fn spec() -> ContractSpec {
    ContractSpec::new(CONTRACT_NAME).with_method(
        MethodSpec::new(AWARD_ITEM)
            .input(ParameterSpec::new("to", ScType::Address))
            .returns(ScType::U32),
    )
}
