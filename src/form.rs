use fantoccini::error::CmdError;
use fantoccini::key::Key;
use fantoccini::{Client, Locator};

use crate::config::SessionConfig;
use crate::error::{ExtractError, Phase, Result};
use crate::params::SearchParameters;
use crate::selectors;

const PHASE: Phase = Phase::FillForm;

/// Fill the search form and submit it, returning once the results list has
/// rendered. The autocomplete fields expose no readiness signal, so a short
/// settle delay follows each burst of keystrokes; the submit itself waits on
/// the results list with a bounded timeout.
pub async fn fill(client: &Client, params: &SearchParameters, config: &SessionConfig) -> Result<()> {
    select_ticket_type(client, params, config).await?;
    fill_locations(client, params, config).await?;
    fill_dates(client, params, config).await?;
    submit(client, config).await
}

async fn select_ticket_type(
    client: &Client,
    params: &SearchParameters,
    config: &SessionConfig,
) -> Result<()> {
    let dropdown = client
        .find(Locator::Css(selectors::TICKET_TYPE_DROPDOWN))
        .await
        .map_err(command)?;
    dropdown.click().await.map_err(command)?;

    client
        .wait()
        .at_most(config.element_timeout())
        .for_element(Locator::Css(selectors::TICKET_TYPE_MENU))
        .await
        .map_err(|e| wait_error(e, "ticket type menu never appeared"))?;

    let wanted = params.ticket_type.menu_label();
    let options = client
        .find_all(Locator::Css(selectors::TICKET_TYPE_OPTION))
        .await
        .map_err(command)?;
    for option in options {
        let text = option.text().await.map_err(command)?;
        if text.contains(wanted) {
            option.click().await.map_err(command)?;
            tokio::time::sleep(config.settle() / 2).await;
            return Ok(());
        }
    }
    Err(ExtractError::page(
        PHASE,
        format!("ticket type option '{}' not listed", wanted),
    ))
}

async fn fill_locations(
    client: &Client,
    params: &SearchParameters,
    config: &SessionConfig,
) -> Result<()> {
    let settle = config.settle();

    let from_input = client
        .find(Locator::Css(selectors::FROM_INPUT))
        .await
        .map_err(command)?;
    from_input.click().await.map_err(command)?;
    from_input.clear().await.map_err(command)?;
    tokio::time::sleep(settle / 4).await;

    type_text(client, &params.departure).await?;
    tokio::time::sleep(settle / 2).await;
    press(client, Key::Tab).await?;
    press(client, Key::Tab).await?;
    tokio::time::sleep(settle / 2).await;

    // Tabbing out of the departure field leaves the destination focused.
    type_text(client, &params.destination).await?;
    tokio::time::sleep(settle / 2).await;
    press(client, Key::Tab).await?;
    press(client, Key::Tab).await?;
    tokio::time::sleep(settle * 2).await;

    Ok(())
}

async fn fill_dates(
    client: &Client,
    params: &SearchParameters,
    config: &SessionConfig,
) -> Result<()> {
    let settle = config.settle();

    type_text(client, &params.departure_date).await?;
    press(client, Key::Tab).await?;
    tokio::time::sleep(settle / 2).await;

    match &params.return_date {
        Some(return_date) => {
            type_text(client, return_date).await?;
            press(client, Key::Tab).await?;
            tokio::time::sleep(settle / 2).await;
        }
        None => {
            press(client, Key::Tab).await?;
        }
    }
    Ok(())
}

async fn submit(client: &Client, config: &SessionConfig) -> Result<()> {
    press(client, Key::Enter).await?;
    client
        .wait()
        .at_most(config.element_timeout())
        .for_element(Locator::Css(selectors::RESULT_ROW))
        .await
        .map_err(|e| wait_error(e, "results list never appeared"))?;
    ::log::debug!("search submitted, results list rendered");
    Ok(())
}

/// Send text to whichever element currently holds focus.
async fn type_text(client: &Client, text: &str) -> Result<()> {
    let focused = client.active_element().await.map_err(command)?;
    focused.send_keys(text).await.map_err(command)
}

async fn press(client: &Client, key: Key) -> Result<()> {
    let focused = client.active_element().await.map_err(command)?;
    focused
        .send_keys(&char::from(key).to_string())
        .await
        .map_err(command)
}

fn command(source: CmdError) -> ExtractError {
    ExtractError::command(PHASE, source)
}

fn wait_error(source: CmdError, reason: &str) -> ExtractError {
    match source {
        CmdError::WaitTimeout => ExtractError::page(PHASE, reason),
        other => ExtractError::command(PHASE, other),
    }
}
