// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_cut;
mod test_wrap;
mod utils;
