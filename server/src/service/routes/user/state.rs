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

use std::collections::hash_map::{Entry, HashMap};

use chrono::Utc;
use miscellaneous::password;
use resources::{
    primitives::Id,
    user::{
        AccountStatus, ProfileUpdateParameters, RegisterParameters, Role, UserUpdateParameters,
    },
    User,
};

use crate::state::Inner;

use super::Error;

#[derive(Default)]
pub struct Users {
    by_id: HashMap<Id, User>,
    by_email: HashMap<String, Id>,
}

impl Users {
    pub fn insert(&mut self, user: User) {
        let id = user.id.clone();
        let email = user.email.clone();

        match self.by_id.entry(id.clone()) {
            Entry::Occupied(e) => {
                panic!("User with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(user);
            }
        }

        self.by_email.insert(email, id);
    }

    pub fn get_by_id(&self, id: &Id) -> Option<&User> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.by_id.values()
    }
}

impl Inner {
    pub fn user_register(&mut self, args: RegisterParameters) -> Result<&User, Error> {
        let email = args.email.trim().to_lowercase();

        if self.users.by_email.contains_key(&email) {
            return Err(Error::EmailTaken(email));
        }

        let now = Utc::now();
        let id = Id::generate().unwrap();
        let role = args.role.unwrap_or_default();
        let doctor_credentials = if role == Role::Doctor {
            args.doctor_credentials
        } else {
            None
        };

        let user = User {
            id: id.clone(),
            name: args.name,
            email,
            phone: args.phone,
            password_hash: password::hash(&args.password),
            role,
            address: args.address.unwrap_or_default(),
            account_status: AccountStatus::Active,
            agree_to_terms: args.agree_to_terms,
            doctor_credentials,
            remember_me: false,
            created_at: now,
            updated_at: now,
        };

        self.users.insert(user);

        Ok(self.users.by_id.get(&id).unwrap())
    }

    pub fn user_login(
        &mut self,
        email: &str,
        password: &str,
        remember_me: Option<bool>,
    ) -> Result<&User, Error> {
        let email = email.trim().to_lowercase();
        let id = self
            .users
            .by_email
            .get(&email)
            .ok_or(Error::InvalidCredentials)?
            .clone();

        let user = self.users.by_id.get_mut(&id).unwrap();

        if !password::verify(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        if let Some(remember_me) = remember_me {
            user.remember_me = remember_me;
            user.updated_at = Utc::now();
        }

        Ok(&*user)
    }

    pub fn user_list(&self) -> Result<Vec<&User>, Error> {
        let mut users: Vec<_> = self.users.iter().collect();

        if users.is_empty() {
            return Err(Error::NoneFound);
        }

        users.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(users)
    }

    pub fn user_get(&self, id: &Id) -> Result<&User, Error> {
        self.users
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    pub fn user_update(&mut self, id: &Id, update: UserUpdateParameters) -> Result<&User, Error> {
        if !self.users.by_id.contains_key(id) {
            return Err(Error::NotFound(id.clone()));
        }

        let new_email = match &update.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if self.users.by_email.get(&email).map_or(false, |other| other != id) {
                    return Err(Error::EmailTaken(email));
                }

                Some(email)
            }
            None => None,
        };

        let user = self.users.by_id.get_mut(id).unwrap();

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = new_email {
            self.users.by_email.remove(&user.email);
            self.users.by_email.insert(email.clone(), id.clone());
            user.email = email;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(address) = update.address {
            user.address = address;
        }
        if let Some(account_status) = update.account_status {
            user.account_status = account_status;
        }
        if user.role == Role::Doctor {
            if let Some(doctor_credentials) = update.doctor_credentials {
                user.doctor_credentials = Some(doctor_credentials);
            }
        }
        user.updated_at = Utc::now();

        Ok(&*user)
    }

    pub fn user_update_profile(
        &mut self,
        id: &Id,
        update: ProfileUpdateParameters,
    ) -> Result<&User, Error> {
        let update = UserUpdateParameters {
            name: update.name,
            email: update.email,
            phone: update.phone,
            role: None,
            address: update.address,
            account_status: None,
            doctor_credentials: update.doctor_credentials,
        };

        self.user_update(id, update)
    }

    pub fn user_delete(&mut self, id: &Id) -> Result<(), Error> {
        let user = self
            .users
            .by_id
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        self.users.by_email.remove(&user.email);

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn register_args(email: &str) -> RegisterParameters {
        RegisterParameters {
            name: "Test User".into(),
            email: email.into(),
            phone: "0123456789".into(),
            password: "secret123".into(),
            confirm_password: Some("secret123".into()),
            agree_to_terms: true,
            role: None,
            address: None,
            doctor_credentials: None,
        }
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let mut inner = Inner::default();

        inner.user_register(register_args("a@example.com")).unwrap();
        let err = inner
            .user_register(register_args("A@Example.Com"))
            .unwrap_err();

        assert!(matches!(err, Error::EmailTaken(_)));
    }

    #[test]
    fn login_verifies_the_password() {
        let mut inner = Inner::default();

        inner.user_register(register_args("a@example.com")).unwrap();

        assert!(inner.user_login("a@example.com", "secret123", None).is_ok());
        assert!(matches!(
            inner.user_login("a@example.com", "wrong", None),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            inner.user_login("b@example.com", "secret123", None),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn login_updates_remember_me() {
        let mut inner = Inner::default();

        let id = inner
            .user_register(register_args("a@example.com"))
            .unwrap()
            .id
            .clone();

        inner
            .user_login("a@example.com", "secret123", Some(true))
            .unwrap();

        assert!(inner.users.by_id.get(&id).unwrap().remember_me);
    }

    #[test]
    fn update_rekeys_the_email_index() {
        let mut inner = Inner::default();

        let id = inner
            .user_register(register_args("a@example.com"))
            .unwrap()
            .id
            .clone();

        let update = UserUpdateParameters {
            email: Some("b@example.com".into()),
            ..Default::default()
        };
        inner.user_update(&id, update).unwrap();

        assert!(inner.user_login("b@example.com", "secret123", None).is_ok());
        assert!(inner.user_login("a@example.com", "secret123", None).is_err());
    }

    #[test]
    fn credentials_are_kept_for_doctors_only() {
        let mut inner = Inner::default();

        let id = inner
            .user_register(register_args("a@example.com"))
            .unwrap()
            .id
            .clone();

        let update = UserUpdateParameters {
            doctor_credentials: Some(Default::default()),
            ..Default::default()
        };
        let user = inner.user_update(&id, update).unwrap();

        assert!(user.doctor_credentials.is_none());
    }

    #[test]
    fn delete_removes_the_user() {
        let mut inner = Inner::default();

        let id = inner
            .user_register(register_args("a@example.com"))
            .unwrap()
            .id
            .clone();

        inner.user_delete(&id).unwrap();

        assert!(matches!(inner.user_get(&id), Err(Error::NotFound(_))));
        assert!(matches!(inner.user_list(), Err(Error::NoneFound)));
    }
}
