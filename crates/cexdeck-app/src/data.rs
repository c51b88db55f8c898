//! Per-section data stores with fetch-once guards

use cexdeck_api::ApiError;
use cexdeck_core::prelude::*;
use cexdeck_core::shaping::{shape_credentials, shape_templates, shape_tenants, ShapedTemplates};
use cexdeck_core::types::{CredentialSet, ModuleCode, Section, TenantRegistration};
use cexdeck_core::wire::{
    CredentialTemplateRequest, CredentialsResponse, PluginTemplateRequest, TemplatesResponse,
    TenantTemplateRequest, TenantTemplatesResponse,
};

/// A backend collection backing one or more sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Templates,
    Tenants,
    Credentials,
}

impl Collection {
    /// Hub and Blueprints share the templates collection.
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Home | Section::Templates => Collection::Templates,
            Section::Tenants => Collection::Tenants,
            Section::Credentials => Collection::Credentials,
        }
    }

    /// Singular noun used in notifications.
    pub fn noun(&self) -> &'static str {
        match self {
            Collection::Templates => "Template",
            Collection::Tenants => "Tenant",
            Collection::Credentials => "Credential set",
        }
    }

    fn load_error(&self) -> &'static str {
        match self {
            Collection::Templates => "Failed to load plugin templates",
            Collection::Tenants => "Failed to load tenants",
            Collection::Credentials => "Failed to load credentials",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mutations
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn verb(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            MutationKind::Create => "created",
            MutationKind::Update => "updated",
            MutationKind::Delete => "deleted",
        }
    }
}

/// A create/update/delete request against one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateTemplate(PluginTemplateRequest),
    UpdateTemplate {
        module: ModuleCode,
        plugin_name: String,
        request: PluginTemplateRequest,
    },
    DeleteTemplate {
        module: ModuleCode,
        plugin_name: String,
    },
    CreateTenant(TenantTemplateRequest),
    UpdateTenant {
        key: String,
        request: TenantTemplateRequest,
    },
    DeleteTenant {
        key: String,
    },
    CreateCredential(CredentialTemplateRequest),
    UpdateCredential {
        key: String,
        request: CredentialTemplateRequest,
    },
    DeleteCredential {
        key: String,
    },
}

impl Mutation {
    pub fn collection(&self) -> Collection {
        match self {
            Mutation::CreateTemplate(_)
            | Mutation::UpdateTemplate { .. }
            | Mutation::DeleteTemplate { .. } => Collection::Templates,
            Mutation::CreateTenant(_)
            | Mutation::UpdateTenant { .. }
            | Mutation::DeleteTenant { .. } => Collection::Tenants,
            Mutation::CreateCredential(_)
            | Mutation::UpdateCredential { .. }
            | Mutation::DeleteCredential { .. } => Collection::Credentials,
        }
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::CreateTemplate(_)
            | Mutation::CreateTenant(_)
            | Mutation::CreateCredential(_) => MutationKind::Create,
            Mutation::UpdateTemplate { .. }
            | Mutation::UpdateTenant { .. }
            | Mutation::UpdateCredential { .. } => MutationKind::Update,
            Mutation::DeleteTemplate { .. }
            | Mutation::DeleteTenant { .. }
            | Mutation::DeleteCredential { .. } => MutationKind::Delete,
        }
    }

    /// Name of the entry being changed.
    pub fn subject(&self) -> &str {
        match self {
            Mutation::CreateTemplate(r) => &r.plugin_name,
            Mutation::UpdateTemplate { plugin_name, .. }
            | Mutation::DeleteTemplate { plugin_name, .. } => plugin_name,
            Mutation::CreateTenant(r) => &r.tenant_key,
            Mutation::CreateCredential(r) => &r.credential_key,
            Mutation::UpdateTenant { key, .. }
            | Mutation::DeleteTenant { key }
            | Mutation::UpdateCredential { key, .. }
            | Mutation::DeleteCredential { key } => key,
        }
    }

    pub fn summary(&self) -> MutationSummary {
        MutationSummary {
            collection: self.collection(),
            kind: self.kind(),
            subject: self.subject().to_string(),
        }
    }
}

/// What a finished mutation was about, for notifications and refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSummary {
    pub collection: Collection,
    pub kind: MutationKind,
    pub subject: String,
}

impl MutationSummary {
    pub fn success_message(&self) -> String {
        format!(
            "{} '{}' {}",
            self.collection.noun(),
            self.subject,
            self.kind.past_tense()
        )
    }

    pub fn failure_message(&self, detail: &str) -> String {
        format!(
            "Failed to {} {} '{}': {}",
            self.kind.verb(),
            self.collection.noun().to_lowercase(),
            self.subject,
            detail
        )
    }
}

/// Fetch-once bookkeeping for one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchGuard {
    /// Set when a fetch finished, successfully or not
    pub fetched: bool,
    /// Set while a fetch is in flight
    pub loading: bool,
    /// A mutation landed mid-fetch; the in-flight answer is stale
    pub refresh_pending: bool,
}

impl FetchGuard {
    pub fn needs_fetch(&self) -> bool {
        !self.fetched && !self.loading
    }
}

#[derive(Debug, Default)]
pub struct DataStore {
    pub templates: ShapedTemplates,
    pub tenants: Vec<TenantRegistration>,
    pub credentials: Vec<CredentialSet>,
    templates_guard: FetchGuard,
    tenants_guard: FetchGuard,
    credentials_guard: FetchGuard,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            templates: ShapedTemplates::empty(),
            ..Default::default()
        }
    }

    pub fn guard(&self, collection: Collection) -> FetchGuard {
        match collection {
            Collection::Templates => self.templates_guard,
            Collection::Tenants => self.tenants_guard,
            Collection::Credentials => self.credentials_guard,
        }
    }

    fn guard_mut(&mut self, collection: Collection) -> &mut FetchGuard {
        match collection {
            Collection::Templates => &mut self.templates_guard,
            Collection::Tenants => &mut self.tenants_guard,
            Collection::Credentials => &mut self.credentials_guard,
        }
    }

    /// Mark a fetch as started if the collection has not been fetched yet.
    /// Returns whether the caller should issue the request.
    pub fn begin_fetch(&mut self, collection: Collection) -> bool {
        let guard = self.guard_mut(collection);
        if !guard.needs_fetch() {
            return false;
        }
        guard.loading = true;
        true
    }

    /// Clear the fetched flag and start a new fetch, unless one is already
    /// in flight.
    pub fn begin_refresh(&mut self, collection: Collection) -> bool {
        let guard = self.guard_mut(collection);
        if guard.loading {
            debug!("Refresh of {:?} skipped: fetch in flight", collection);
            return false;
        }
        guard.fetched = false;
        self.begin_fetch(collection)
    }

    /// Refetch after a successful mutation. When a fetch is already in
    /// flight its answer predates the mutation, so the refetch is queued and
    /// issued by [`DataStore::take_pending_refresh`] once that answer lands.
    pub fn refresh_after_mutation(&mut self, collection: Collection) -> bool {
        let guard = self.guard_mut(collection);
        if guard.loading {
            debug!("Refetch of {:?} queued behind in-flight fetch", collection);
            guard.refresh_pending = true;
            return false;
        }
        guard.fetched = false;
        self.begin_fetch(collection)
    }

    /// Start the queued refetch, if any. Call after applying a fetch result.
    pub fn take_pending_refresh(&mut self, collection: Collection) -> bool {
        let guard = self.guard_mut(collection);
        if !guard.refresh_pending || guard.loading {
            return false;
        }
        guard.refresh_pending = false;
        guard.fetched = false;
        guard.loading = true;
        true
    }

    fn finish_fetch(&mut self, collection: Collection) {
        let guard = self.guard_mut(collection);
        guard.loading = false;
        guard.fetched = true;
    }

    /// Apply a templates fetch result. On failure the previous lists stay and
    /// the notification text is returned.
    pub fn apply_templates(
        &mut self,
        result: std::result::Result<TemplatesResponse, ApiError>,
    ) -> std::result::Result<(), String> {
        self.finish_fetch(Collection::Templates);
        let response = Self::check(Collection::Templates, result)?;
        self.templates = shape_templates(&response);
        debug!("Loaded {} templates", self.templates.templates.len());
        Ok(())
    }

    pub fn apply_tenants(
        &mut self,
        result: std::result::Result<TenantTemplatesResponse, ApiError>,
    ) -> std::result::Result<(), String> {
        self.finish_fetch(Collection::Tenants);
        let response = Self::check(Collection::Tenants, result)?;
        self.tenants = shape_tenants(&response);
        debug!("Loaded {} tenants", self.tenants.len());
        Ok(())
    }

    pub fn apply_credentials(
        &mut self,
        result: std::result::Result<CredentialsResponse, ApiError>,
    ) -> std::result::Result<(), String> {
        self.finish_fetch(Collection::Credentials);
        let response = Self::check(Collection::Credentials, result)?;
        self.credentials = shape_credentials(&response);
        debug!("Loaded {} credential sets", self.credentials.len());
        Ok(())
    }

    fn check<T>(
        collection: Collection,
        result: std::result::Result<T, ApiError>,
    ) -> std::result::Result<T, String> {
        result.map_err(|e| {
            warn!("{}: {}", collection.load_error(), e);
            collection.load_error().to_string()
        })
    }

    /// Number of rows a section currently lists.
    pub fn row_count(&self, section: Section, module: ModuleCode) -> usize {
        match section {
            Section::Home => self.templates.plugins_for(module).len(),
            Section::Templates => self.templates.templates.len(),
            Section::Tenants => self.tenants.len(),
            Section::Credentials => self.credentials.len(),
        }
    }
}
