// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod book;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod parser;
pub mod storage;
pub mod tags;
pub mod utils;
