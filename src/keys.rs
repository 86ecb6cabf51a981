/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Built-in public verification keys.
//!
//! Two fixed `(modulus, exponent)` pairs, one per container variant. These are
//! the trust anchors of the whole scheme: a container is authentic exactly
//! when its signature decodes under the matching pair. They are never derived
//! or configurable, and the decimal constants must stay bit-exact: different
//! constants silently change the trust domain.

use num_bigint::BigUint;

/// RSA-domain public parameters used purely for verification.
#[derive(Debug, Clone)]
pub struct PublicKeyParams {
    pub modulus: BigUint,
    pub exponent: BigUint,
}

/// Verification modulus for full database containers (`ClamAV-VDB`).
const FULL_DATABASE_MODULUS: &[u8] = b"118640995551645342603070001658453189751527774412027743746599405743243142607464144767361060640655844749760788890022283424922762488917565551002467771109669598189410434699034532232228621591089508178591428456220796841621637175567590476666928698770143328137383952820383197532047771780196576957695822641224262693037";

/// Verification exponent for full database containers.
const FULL_DATABASE_EXPONENT: &[u8] = b"100001027";

/// Verification modulus for incremental patch containers (`ClamAV-Diff`).
const INCREMENTAL_PATCH_MODULUS: &[u8] = b"14783905874077467090262228516557917570254599638376203532031989214105552847269687489771975792123442185817287694951949800908791527542017115600501303394778618535864845235700041590056318230102449612217458549016089313306591388590790796515819654102320725712300822356348724011232654837503241736177907784198700834440681124727060540035754699658105895050096576226753008596881698828185652424901921668758326578462003247906470982092298106789657211905488986281078346361469524484829559560886227198091995498440676639639830463593211386055065360288422394053998134458623712540683294034953818412458362198117811990006021989844180721010947";

/// Verification exponent for incremental patch containers.
const INCREMENTAL_PATCH_EXPONENT: &[u8] = b"100002053";

impl PublicKeyParams {
    /// Trust anchor for `ClamAV-VDB` containers.
    pub fn full_database() -> Self {
        Self::from_decimal(FULL_DATABASE_MODULUS, FULL_DATABASE_EXPONENT)
    }

    /// Trust anchor for `ClamAV-Diff` containers.
    pub fn incremental_patch() -> Self {
        Self::from_decimal(INCREMENTAL_PATCH_MODULUS, INCREMENTAL_PATCH_EXPONENT)
    }

    fn from_decimal(modulus: &[u8], exponent: &[u8]) -> Self {
        Self {
            modulus: BigUint::parse_bytes(modulus, 10).expect("builtin modulus is valid decimal"),
            exponent: BigUint::parse_bytes(exponent, 10)
                .expect("builtin exponent is valid decimal"),
        }
    }
}
