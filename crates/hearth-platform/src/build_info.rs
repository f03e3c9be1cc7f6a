// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compile-time identification of the running binary.

use hearth_core::{BuildIdentity, SystemConfig};

/// Operating system the binary was built for.
pub const PLATFORM: &str = std::env::consts::OS;

/// CPU architecture the binary was built for.
pub const ARCHITECTURE: &str = std::env::consts::ARCH;

/// Compiler that built the binary, recorded by the build script.
pub const COMPILER: &str = env!("HEARTH_RUSTC_VERSION");

/// Builds the identity block of crash reports from `config`.
pub fn identity(config: &SystemConfig) -> BuildIdentity {
    BuildIdentity {
        product: config.product.clone(),
        version: config.version.clone(),
        platform: PLATFORM.to_string(),
        architecture: ARCHITECTURE.to_string(),
        compiler: COMPILER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_combines_config_and_target() {
        let config = SystemConfig {
            product: "Sandbox".to_string(),
            version: "9.9".to_string(),
            ..Default::default()
        };
        let id = identity(&config);

        assert_eq!(id.product, "Sandbox");
        assert_eq!(id.version, "9.9");
        assert_eq!(id.platform, std::env::consts::OS);
        assert_eq!(id.architecture, std::env::consts::ARCH);
        assert!(id.compiler.starts_with("rustc"), "got: {}", id.compiler);
    }
}
