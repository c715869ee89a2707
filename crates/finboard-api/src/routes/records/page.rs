//! Record page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_record_edit: Edit form for one record
//!
//! Helper functions:
//! - render_edit_form: Form pre-filled from the record

use crate::ApiError;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use finboard_config::{Config, CurrencyConfig};
use finboard_core::{Intent, Record, RecordEndpoint, ResourceKind};
use finboard_utils::{amount_step, escape_html, format_amount};

/// Edit page - record form with save and delete actions
pub async fn page_record_edit<K: ResourceKind>(
    State(endpoint): State<RecordEndpoint<K>>,
    State(config): State<Config>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let record = endpoint.read(Some(&id)).await?;
    let inner_content = render_edit_form::<K>(&record, &config.currency);
    let title = format!("{}: {}", K::DISPLAY_NAME, record.title());

    Ok(Html(crate::page_response(
        &headers,
        &title,
        &K::listing_path(),
        &inner_content,
    )))
}

/// Render the edit form.
///
/// Save goes through htmx so the page stays put and shows a status line;
/// Delete is a plain form post so the browser follows the redirect.
pub fn render_edit_form<K: ResourceKind>(record: &K::Record, currency: &CurrencyConfig) -> String {
    // The id is one path segment; axum decodes it again on the way in
    let action = escape_html(&K::record_path(&urlencoding::encode(record.id())));
    let symbol = escape_html(&currency.symbol);

    format!(
        r#"<div class='max-w-xl'>
        <div class='flex items-center justify-between mb-6'>
            <h2 class='text-2xl font-bold'>{display_name}</h2>
            <span class='text-sm text-gray-500'>{formatted_amount} {symbol}</span>
        </div>
        <form method='POST' action='{action}' hx-post='{action}' hx-swap='none'
            hx-on::after-request="document.getElementById('save-status').textContent = event.detail.successful ? 'Changes saved!' : 'Could not save changes'"
            class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
            <label class='block'>
                <span class='text-sm text-gray-600'>Title:</span>
                <input type='text' name='title' value='{title}' required class='mt-1 w-full px-3 py-2 border rounded-lg'>
            </label>
            <label class='block'>
                <span class='text-sm text-gray-600'>Description:</span>
                <textarea name='description' rows='3' class='mt-1 w-full px-3 py-2 border rounded-lg'>{description}</textarea>
            </label>
            <label class='block'>
                <span class='text-sm text-gray-600'>Amount (in {symbol}):</span>
                <input type='number' name='amount' value='{amount}' step='{step}' required class='mt-1 w-full px-3 py-2 border rounded-lg'>
            </label>
            <div class='flex items-center gap-3'>
                <button type='submit' name='{intent_field}' value='{update}' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Save</button>
                <span class='htmx-indicator text-sm text-gray-500'>Saving...</span>
                <p id='save-status' aria-live='polite' class='text-sm text-green-600'></p>
            </div>
        </form>
        <form method='POST' action='{action}' class='mt-4'>
            <button type='submit' name='{intent_field}' value='{delete}' class='px-4 py-2 bg-red-50 text-red-700 rounded-lg hover:bg-red-100'>Delete</button>
        </form>
        <a href='{listing}' class='fixed bottom-6 right-6 px-5 py-3 bg-indigo-600 text-white rounded-full shadow-lg hover:bg-indigo-700'>Add {kind}</a>
    </div>"#,
        display_name = K::DISPLAY_NAME,
        formatted_amount = format_amount(record.amount(), currency.decimal_places),
        symbol = symbol,
        action = action,
        title = escape_html(record.title()),
        description = escape_html(record.description().unwrap_or("")),
        amount = record.amount(),
        step = amount_step(currency.decimal_places),
        intent_field = Intent::FIELD,
        update = Intent::Update,
        delete = Intent::Delete,
        listing = escape_html(&K::listing_path()),
        kind = <K::Record as Record>::KIND,
    )
}
