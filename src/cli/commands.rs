//! CLI command implementations

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{self, registrations::Campaign, ApiClient, ListQuery, Page, PageRequest};
use crate::auth::{self, FileStorage, GuardDecision, Route, SessionStore};
use crate::cli::{
    error, info, parse_status, print_decision, print_page_footer, print_rows, print_user, success,
    warn, OutputFormat, Resource, TableRow,
};
use crate::config::{self, Config};
use crate::error::Error;
use crate::records::{self, Searchable};

/// Initialize a new schoolmed.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("schoolmed.toml");

    if config_path.exists() {
        warn("schoolmed.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created schoolmed.toml");
    info("Set api.base_url and run 'schoolmed login' to start a session");

    Ok(())
}

/// Log in with email and password
pub async fn login(email: Option<String>, password: Option<String>) -> Result<()> {
    let (config, store) = open_session()?;
    let theme = ColorfulTheme::default();

    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    let client = ApiClient::new(&config.api, store.clone())?;
    match with_spinner("Signing in...", auth::login(&client, &store, &email, &password)).await {
        Ok(user) => {
            success(&format!("Logged in as {} ({})", user.email, user.role));
            if let Some(home) = user.role.home_path() {
                info(&format!("Home: {}", home));
            }
            Ok(())
        }
        Err(e) => {
            let fields = e.field_errors();
            if fields.is_empty() {
                error(&format!("Login failed: {}", e));
            } else {
                for (field, message) in &fields {
                    error(&format!("{}: {}", field, message));
                }
            }
            Err(e.into())
        }
    }
}

/// Clear the stored session
pub async fn logout() -> Result<()> {
    let (_, store) = open_session()?;
    store.logout();
    success("Logged out");
    Ok(())
}

/// Show the current identity
pub async fn whoami() -> Result<()> {
    let (_, store) = open_session()?;

    match store.current_user() {
        Some(user) => {
            print_user(&user);
            Ok(())
        }
        None => Err(Error::NotAuthenticated.into()),
    }
}

/// Evaluate the navigation guard for a route path
pub async fn route(path: &str) -> Result<()> {
    let (_, store) = open_session()?;

    let Some(route) = Route::from_path(path) else {
        bail!("Unknown route: {}", path);
    };

    let decision = route.check(&store.snapshot());
    print_decision(route.path(), &decision);
    Ok(())
}

/// List records of one kind
pub async fn list(
    resource: Resource,
    page: u32,
    size: u32,
    search: Option<String>,
    status: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let (config, store) = open_session()?;
    let role = store.current_user().map(|u| u.role);
    guard(&store, resource.route_for(role.as_ref()))?;

    let client = ApiClient::new(&config.api, store)?;
    let request = PageRequest::new(page, size);
    let status = status.as_deref().map(parse_status);
    let mut query = ListQuery::default();
    if let Some(search) = &search {
        query = query.keyword(search.as_str());
    }
    if let Some(status) = &status {
        query = query.status(status.clone());
    }
    let view = View {
        search: search.as_deref(),
        status: status.as_ref(),
        format,
    };

    match resource {
        Resource::Appointments => {
            let page = with_spinner("Loading appointments...", api::appointments::list(&client, request, &query)).await?;
            view.show(page)
        }
        Resource::MedicalEvents => {
            let page = with_spinner("Loading medical events...", api::medical_events::list(&client, request, &query)).await?;
            view.show(page)
        }
        Resource::MedicineSubmissions => {
            let page = with_spinner(
                "Loading medicine submissions...",
                api::medicine_submissions::list(&client, request, &query),
            )
            .await?;
            view.show(page)
        }
        Resource::VaccinationRegistrations => {
            let page = with_spinner(
                "Loading vaccination registrations...",
                api::registrations::list(&client, Campaign::Vaccination, request, &query),
            )
            .await?;
            view.show(page)
        }
        Resource::MedicalCheckRegistrations => {
            let page = with_spinner(
                "Loading medical check registrations...",
                api::registrations::list(&client, Campaign::MedicalCheck, request, &query),
            )
            .await?;
            view.show(page)
        }
        Resource::Users => {
            let page = with_spinner("Loading users...", api::directory::list_users(&client, request, &query)).await?;
            view.show(page)
        }
        Resource::Classes => {
            let page = with_spinner("Loading classes...", api::directory::list_classes(&client, request, &query)).await?;
            view.show(page)
        }
        Resource::Students => {
            let page = with_spinner("Loading students...", api::directory::list_students(&client, request, &query)).await?;
            view.show(page)
        }
    }
}

/// List the logged-in parent's children
pub async fn children(format: OutputFormat) -> Result<()> {
    let (config, store) = open_session()?;
    guard(&store, Route::ParentChildren)?;

    let parent_id = match store.current_user() {
        Some(user) => user.id,
        None => return Err(Error::NotAuthenticated.into()),
    };

    let client = ApiClient::new(&config.api, store)?;
    let students = with_spinner(
        "Loading linked students...",
        api::directory::children_of(&client, &parent_id),
    )
    .await?;

    print_rows(&students, format)
}

/// Client-side presentation of a fetched page
struct View<'a> {
    search: Option<&'a str>,
    status: Option<&'a records::Status>,
    format: OutputFormat,
}

impl View<'_> {
    fn show<T>(&self, mut page: Page<T>) -> Result<()>
    where
        T: TableRow + Searchable + Serialize,
    {
        let mut rows = std::mem::take(&mut page.items);
        if let Some(query) = self.search {
            rows = records::search(rows, query);
        }
        if let Some(status) = self.status {
            rows = records::with_status(rows, status);
        }

        print_rows(&rows, self.format)?;
        if matches!(self.format, OutputFormat::Table) {
            print_page_footer(&page, rows.len());
        }
        Ok(())
    }
}

/// Load config and restore the persisted session
fn open_session() -> Result<(Config, SessionStore)> {
    let config = config::load_config_or_default()?;
    let storage = Arc::new(FileStorage::new(&config.session.storage_path));
    let store = SessionStore::new(storage).with_require_expiry(config.session.require_expiry);
    store.initialize();
    Ok((config, store))
}

/// Fail unless the guard allows `route`
fn guard(store: &SessionStore, route: Route) -> Result<()> {
    match route.check(&store.snapshot()) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => Err(Error::NotAuthenticated.into()),
        decision => {
            print_decision(route.path(), &decision);
            Err(Error::Forbidden(format!("{} ({})", route.path(), decision)).into())
        }
    }
}

/// Show a spinner while `fut` runs
async fn with_spinner<T, F>(message: &str, fut: F) -> crate::error::Result<T>
where
    F: Future<Output = crate::error::Result<T>>,
{
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());

    let result = fut.await;
    pb.finish_and_clear();
    result
}
