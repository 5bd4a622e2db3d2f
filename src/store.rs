// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory repository for users, organizations, chains and news.
//!
//! The store only enforces referential rules (uniqueness, membership);
//! authorization happens in the API layer before any mutation.

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::auth::UserAuthority;
use crate::error::{
    ApiError, MSG_ALREADY_EXISTS, MSG_EMAIL_CHANGE_FORBIDDEN, MSG_EMAIL_TAKEN,
    MSG_NAME_CHANGE_FORBIDDEN, MSG_NAME_TAKEN, MSG_PHONE_TAKEN,
};
use crate::models::{
    now_millis, News, NewsFields, Organization, OrganizationChain, OrganizationFields, User,
    UserFields,
};

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<Uuid, User>,
    organizations: HashMap<Uuid, Organization>,
    chains: HashMap<Uuid, OrganizationChain>,
    news: HashMap<Uuid, News>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub fn insert_user(
        &mut self,
        fields: UserFields,
        password_hash: String,
        authorities: impl IntoIterator<Item = UserAuthority>,
    ) -> Result<User, ApiError> {
        if self.email_taken(&fields.email, None) {
            return Err(ApiError::conflict(MSG_EMAIL_TAKEN));
        }
        if self.phone_taken(&fields.phone_number, None) {
            return Err(ApiError::conflict(MSG_PHONE_TAKEN));
        }

        let now = now_millis();
        let user = User {
            id: Uuid::new_v4(),
            name: fields.name,
            surname: fields.surname,
            email: fields.email,
            password_hash,
            phone_number: fields.phone_number,
            authorities: authorities.into_iter().collect(),
            organization_id: None,
            created_at: now,
            last_seen_at: now,
            online: false,
            level: 0,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users.values().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Find a user by email (case-insensitive), falling back to exact phone
    /// number. Blank input matches nobody.
    pub fn user_by_login(&self, email_or_phone: &str) -> Option<&User> {
        let needle = email_or_phone.trim();
        if needle.is_empty() {
            return None;
        }
        self.user_by_email(needle)
            .or_else(|| self.users.values().find(|u| u.phone_number == needle))
    }

    pub fn update_user(
        &mut self,
        id: Uuid,
        fields: UserFields,
        password_hash: String,
    ) -> Result<User, ApiError> {
        let user = self.users.get(&id).ok_or_else(ApiError::not_found)?;
        if !user.email.eq_ignore_ascii_case(&fields.email) {
            return Err(ApiError::bad_request(MSG_EMAIL_CHANGE_FORBIDDEN));
        }
        if self.phone_taken(&fields.phone_number, Some(id)) {
            return Err(ApiError::conflict(MSG_PHONE_TAKEN));
        }

        let user = self.users.get_mut(&id).ok_or_else(ApiError::not_found)?;
        user.name = fields.name;
        user.surname = fields.surname;
        user.password_hash = password_hash;
        user.phone_number = fields.phone_number;
        Ok(user.clone())
    }

    pub fn delete_user(&mut self, id: Uuid) -> Result<(), ApiError> {
        let user = self.users.remove(&id).ok_or_else(ApiError::not_found)?;
        if let Some(org_id) = user.organization_id {
            if let Some(org) = self.organizations.get_mut(&org_id) {
                org.managers.remove(&id);
            }
        }
        Ok(())
    }

    /// Record a successful login.
    pub fn touch_user(&mut self, id: Uuid) {
        self.set_presence(id, true);
    }

    /// Record a logout.
    pub fn sign_out_user(&mut self, id: Uuid) {
        self.set_presence(id, false);
    }

    fn set_presence(&mut self, id: Uuid, online: bool) {
        if let Some(user) = self.users.get_mut(&id) {
            user.last_seen_at = now_millis();
            user.online = online;
        }
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| {
                Some(u.id) != except
                    && (u.email.eq_ignore_ascii_case(email) || u.phone_number.eq_ignore_ascii_case(email))
            })
    }

    /// A phone number may not repeat another account's phone or email, so a
    /// login string always names one account.
    fn phone_taken(&self, phone: &str, except: Option<Uuid>) -> bool {
        let phone = phone.trim();
        !phone.is_empty()
            && self.users.values().any(|u| {
                Some(u.id) != except
                    && (u.phone_number == phone || u.email.eq_ignore_ascii_case(phone))
            })
    }

    // -------------------------------------------------------------------------
    // Organizations
    // -------------------------------------------------------------------------

    pub fn create_organization(&mut self, fields: OrganizationFields) -> Result<Organization, ApiError> {
        if self.organization_name_taken(&fields.name) {
            return Err(ApiError::conflict(MSG_NAME_TAKEN));
        }

        let organization = Organization {
            id: Uuid::new_v4(),
            name: fields.name,
            country: fields.country,
            city: fields.city,
            address: fields.address,
            postcode: fields.postcode,
            number: fields.number,
            email: fields.email,
            chain_id: None,
            managers: BTreeSet::new(),
            created_at: now_millis(),
        };
        self.organizations.insert(organization.id, organization.clone());
        Ok(organization)
    }

    pub fn organization(&self, id: Uuid) -> Result<&Organization, ApiError> {
        self.organizations.get(&id).ok_or_else(ApiError::not_found)
    }

    pub fn update_organization(
        &mut self,
        id: Uuid,
        fields: OrganizationFields,
    ) -> Result<Organization, ApiError> {
        let organization = self.organizations.get_mut(&id).ok_or_else(ApiError::not_found)?;
        if organization.name != fields.name {
            return Err(ApiError::bad_request(MSG_NAME_CHANGE_FORBIDDEN));
        }

        organization.country = fields.country;
        organization.city = fields.city;
        organization.address = fields.address;
        organization.postcode = fields.postcode;
        organization.number = fields.number;
        organization.email = fields.email;
        Ok(organization.clone())
    }

    /// Delete an organization, detaching its chain and managers.
    pub fn delete_organization(&mut self, id: Uuid) -> Result<(), ApiError> {
        let organization = self.organizations.remove(&id).ok_or_else(ApiError::not_found)?;

        if let Some(chain_id) = organization.chain_id {
            if let Some(chain) = self.chains.get_mut(&chain_id) {
                chain.organizations.remove(&id);
            }
        }
        for manager_id in &organization.managers {
            if let Some(user) = self.users.get_mut(manager_id) {
                user.organization_id = None;
            }
        }
        Ok(())
    }

    pub fn managers(&self, organization_id: Uuid) -> Result<Vec<&User>, ApiError> {
        let organization = self.organization(organization_id)?;
        Ok(organization
            .managers
            .iter()
            .filter_map(|id| self.users.get(id))
            .collect())
    }

    /// Make a user a manager of an organization.
    ///
    /// A user manages at most one organization.
    pub fn add_manager(&mut self, organization_id: Uuid, user_id: Uuid) -> Result<Organization, ApiError> {
        self.organization(organization_id)?;
        let user = self.users.get_mut(&user_id).ok_or_else(ApiError::not_found)?;

        if user.organization_id.is_some() {
            return Err(ApiError::conflict(MSG_ALREADY_EXISTS));
        }
        user.organization_id = Some(organization_id);

        let organization = self
            .organizations
            .get_mut(&organization_id)
            .ok_or_else(ApiError::not_found)?;
        organization.managers.insert(user_id);
        Ok(organization.clone())
    }

    pub fn remove_manager(&mut self, organization_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let organization = self
            .organizations
            .get_mut(&organization_id)
            .ok_or_else(ApiError::not_found)?;
        if !organization.managers.remove(&user_id) {
            return Err(ApiError::not_found());
        }
        if let Some(user) = self.users.get_mut(&user_id) {
            user.organization_id = None;
        }
        Ok(())
    }

    fn organization_name_taken(&self, name: &str) -> bool {
        self.organizations
            .values()
            .any(|o| o.name.eq_ignore_ascii_case(name))
    }

    // -------------------------------------------------------------------------
    // Organization chains
    // -------------------------------------------------------------------------

    pub fn create_chain(&mut self, name: String) -> Result<OrganizationChain, ApiError> {
        if self.chains.values().any(|c| c.name.eq_ignore_ascii_case(&name)) {
            return Err(ApiError::conflict(MSG_NAME_TAKEN));
        }

        let chain = OrganizationChain {
            id: Uuid::new_v4(),
            name,
            organizations: BTreeSet::new(),
        };
        self.chains.insert(chain.id, chain.clone());
        Ok(chain)
    }

    pub fn chain(&self, id: Uuid) -> Result<&OrganizationChain, ApiError> {
        self.chains.get(&id).ok_or_else(ApiError::not_found)
    }

    pub fn chain_organizations(&self, chain_id: Uuid) -> Result<Vec<&Organization>, ApiError> {
        let chain = self.chain(chain_id)?;
        Ok(chain
            .organizations
            .iter()
            .filter_map(|id| self.organizations.get(id))
            .collect())
    }

    /// Attach an organization to a chain. An organization joins at most one chain.
    pub fn add_organization_to_chain(
        &mut self,
        chain_id: Uuid,
        organization_id: Uuid,
    ) -> Result<OrganizationChain, ApiError> {
        self.chain(chain_id)?;
        let organization = self
            .organizations
            .get_mut(&organization_id)
            .ok_or_else(ApiError::not_found)?;

        if organization.chain_id.is_some() {
            return Err(ApiError::conflict(MSG_ALREADY_EXISTS));
        }
        organization.chain_id = Some(chain_id);

        let chain = self.chains.get_mut(&chain_id).ok_or_else(ApiError::not_found)?;
        chain.organizations.insert(organization_id);
        Ok(chain.clone())
    }

    pub fn remove_organization_from_chain(
        &mut self,
        chain_id: Uuid,
        organization_id: Uuid,
    ) -> Result<(), ApiError> {
        let chain = self.chains.get_mut(&chain_id).ok_or_else(ApiError::not_found)?;
        if !chain.organizations.remove(&organization_id) {
            return Err(ApiError::not_found());
        }
        if let Some(organization) = self.organizations.get_mut(&organization_id) {
            organization.chain_id = None;
        }
        Ok(())
    }

    /// Delete a chain; its organizations remain but are detached.
    pub fn delete_chain(&mut self, chain_id: Uuid) -> Result<(), ApiError> {
        let chain = self.chains.remove(&chain_id).ok_or_else(ApiError::not_found)?;
        for organization_id in chain.organizations {
            if let Some(organization) = self.organizations.get_mut(&organization_id) {
                organization.chain_id = None;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // News
    // -------------------------------------------------------------------------

    pub fn create_news(&mut self, fields: NewsFields) -> News {
        let news = News {
            id: Uuid::new_v4(),
            title: fields.title,
            content: fields.content,
            created_at: now_millis(),
            featured_image: fields.featured_image,
            additional_images: fields.additional_images,
        };
        self.news.insert(news.id, news.clone());
        news
    }

    pub fn news(&self, id: Uuid) -> Result<&News, ApiError> {
        self.news.get(&id).ok_or_else(ApiError::not_found)
    }

    /// All news, newest first.
    pub fn list_news(&self) -> Vec<News> {
        let mut items: Vec<News> = self.news.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        items
    }

    pub fn update_news(&mut self, id: Uuid, fields: NewsFields) -> Result<News, ApiError> {
        let news = self.news.get_mut(&id).ok_or_else(ApiError::not_found)?;
        news.title = fields.title;
        news.content = fields.content;
        news.featured_image = fields.featured_image;
        news.additional_images = fields.additional_images;
        Ok(news.clone())
    }

    pub fn delete_news(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.news
            .remove(&id)
            .map(|_| ())
            .ok_or_else(ApiError::not_found)
    }
}
