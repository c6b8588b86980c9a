use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_numbers, parse_list, truncate_with_ellipsis};
use crate::db::{Account, AccountFilter, AccountRepository, QueryContext};

#[derive(Tabled)]
pub(crate) struct AccountDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Email")]
    pub(crate) email: String,
    #[tabled(rename = "Active")]
    pub(crate) active: String,
    #[tabled(rename = "Color")]
    pub(crate) fav_color: String,
    #[tabled(rename = "Numbers")]
    pub(crate) fav_numbers: String,
}

impl From<&Account> for AccountDisplay {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: truncate_with_ellipsis(&account.name, 30),
            email: truncate_with_ellipsis(&account.email, 40),
            active: if account.active { "yes" } else { "no" }.to_string(),
            fav_color: account.fav_color.clone(),
            fav_numbers: format_numbers(&account.fav_numbers),
        }
    }
}

pub(crate) fn format_table(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let display: Vec<AccountDisplay> = accounts.iter().map(|a| a.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

fn format_accounts(accounts: &[Account], format: &str) -> CliResult<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(accounts)?),
        _ => Ok(format_table(accounts)),
    }
}

/// Get a single account by ID
pub async fn get_account<R: AccountRepository>(
    repo: &R,
    ctx: &QueryContext,
    id: u64,
    format: &str,
) -> CliResult<String> {
    let account = repo
        .find_by_id(ctx, id)
        .await?
        .ok_or(CliError::NotFound { id })?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&account)?),
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            builder.push_record(["ID", &account.id.to_string()]);
            builder.push_record(["Name", &account.name]);
            builder.push_record(["Email", &account.email]);
            builder.push_record(["Active", &account.active.to_string()]);
            builder.push_record(["Favorite color", &account.fav_color]);
            builder.push_record(["Favorite numbers", &format_numbers(&account.fav_numbers)]);
            builder.push_record([
                "Properties",
                &truncate_with_ellipsis(&account.properties.to_string(), 200),
            ]);
            builder.push_record(["Created", &account.created_at.to_rfc3339()]);

            let mut table = builder.build();
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// List all accounts
pub async fn list_accounts<R: AccountRepository>(
    repo: &R,
    ctx: &QueryContext,
    format: &str,
) -> CliResult<String> {
    let accounts = repo.find_all(ctx).await?;
    format_accounts(&accounts, format)
}

/// List accounts matching optional filters
pub async fn filter_accounts<R: AccountRepository>(
    repo: &R,
    ctx: &QueryContext,
    names: Option<&str>,
    active: Option<bool>,
    colors: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let filter = AccountFilter {
        names: parse_list(names),
        active,
        fav_colors: parse_list(colors),
    };

    let accounts = repo.find_filtered(ctx, &filter).await?;
    format_accounts(&accounts, format)
}
