// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_edits;
mod utils;
