/*
 * Copyright (c) 2021 gematik GmbH
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *    http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::Id;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub address: Address,
    pub account_status: AccountStatus,
    pub agree_to_terms: bool,
    pub doctor_credentials: Option<DoctorCredentials>,
    #[serde(default)]
    pub remember_me: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outward projection of a user. The password digest never leaves the
/// store; doctor credentials are only exposed for doctors.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub address: Address,
    pub account_status: AccountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_credentials: Option<DoctorCredentials>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParameters {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: Option<String>,
    #[serde(default)]
    pub agree_to_terms: bool,
    pub role: Option<Role>,
    pub address: Option<Address>,
    pub doctor_credentials: Option<DoctorCredentials>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginParameters {
    pub email: String,
    pub password: String,
    pub remember_me: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateParameters {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub address: Option<Address>,
    pub account_status: Option<AccountStatus>,
    pub doctor_credentials: Option<DoctorCredentials>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateParameters {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub doctor_credentials: Option<DoctorCredentials>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Doctor,
    Admin,
    Official,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Suspended,
    Pending,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    pub province: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorCredentials {
    pub license_number: Option<String>,
    pub clinic_name: Option<String>,
    pub specialization: Option<String>,
}

impl Default for Role {
    fn default() -> Self {
        Self::Patient
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        let doctor_credentials = if user.role == Role::Doctor {
            user.doctor_credentials.clone()
        } else {
            None
        };

        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            address: user.address.clone(),
            account_status: user.account_status,
            doctor_credentials,
        }
    }
}
