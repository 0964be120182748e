// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Env values used by shipsign.
pub const SHIPSIGN_API_KEY: &str = "SHIPSIGN_API_KEY";
pub const SHIPSIGN_API_SECRET: &str = "SHIPSIGN_API_SECRET";
pub const SHIPSIGN_BASE_URL: &str = "SHIPSIGN_BASE_URL";
pub const SHIPSIGN_API_MOUNT: &str = "SHIPSIGN_API_MOUNT";

// Defaults.
pub const DEFAULT_BASE_URL: &str = "https://app.shippingeasy.com";
pub const DEFAULT_API_MOUNT: &str = "/api";

/// Query param carrying the hex encoded signature.
pub const API_SIGNATURE: &str = "api_signature";
/// Query param carrying the unix timestamp the signature was computed at.
pub const API_TIMESTAMP: &str = "api_timestamp";
/// Query param carrying the public api key.
pub const API_KEY: &str = "api_key";
