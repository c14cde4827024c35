use crate::{
    Error, Result,
    controller::FormController,
    form::{CROP_TYPES, FormField, SOIL_TYPES},
    ui::render,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

pub const HELP_TEXT: &str = "\
Commands:
  set <field> <value>  set a form field (n, p, k, temperature, humidity, moisture, soil_type, crop_type)
  show                 show the current form values
  options              list soil and crop type options
  submit               request a fertilizer recommendation
  reset                clear the form and hide results
  health               check the prediction service
  help                 show this message
  quit                 leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set(FormField, String),
    Show,
    Options,
    Submit,
    Reset,
    Health,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(Error::form("usage: set <field> <value>"));
                }
                Ok(Command::Set(field.parse()?, value.to_string()))
            }
            "show" => Ok(Command::Show),
            "options" => Ok(Command::Options),
            "submit" => Ok(Command::Submit),
            "reset" => Ok(Command::Reset),
            "health" => Ok(Command::Health),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(Error::form(format!(
                "unknown command '{}' (type 'help')",
                other
            ))),
        }
    }
}

/// Runs the form over a line-oriented input until `quit` or end of input.
pub async fn run<R, W>(controller: &mut FormController, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Session started");
    output.write_all(b"Fertilizer Recommendation\n").await?;
    output.write_all(HELP_TEXT.as_bytes()).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                write_line(output, &e.panel_message()).await?;
                continue;
            }
        };

        debug!("Session command: {:?}", command);
        if command == Command::Quit {
            break;
        }
        execute(controller, command, output).await?;
    }

    info!("Session ended");
    Ok(())
}

async fn execute<W>(controller: &mut FormController, command: Command, output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    match command {
        Command::Set(field, value) => {
            if let Err(e) = controller.form_mut().set(field, &value) {
                write_line(output, &e.panel_message()).await?;
            }
        }
        Command::Show => write_form(controller, output).await?,
        Command::Options => {
            write_line(output, &format!("Soil types: {}", SOIL_TYPES.join(", "))).await?;
            write_line(output, &format!("Crop types: {}", CROP_TYPES.join(", "))).await?;
        }
        Command::Submit => {
            let pending = controller.begin_submit()?;
            output
                .write_all(render(controller.state()).as_bytes())
                .await?;
            output.flush().await?;

            let outcome = controller.api().predict(&pending.request).await;
            let state = controller.complete_submit(pending.seq, outcome)?;
            output.write_all(render(state).as_bytes()).await?;
        }
        Command::Reset => {
            controller.reset()?;
            write_line(output, "Form reset.").await?;
            write_form(controller, output).await?;
        }
        Command::Health => match controller.health().await {
            Ok(health) => {
                let loaded = if health.model_loaded { "yes" } else { "no" };
                write_line(
                    output,
                    &format!("Service: {} (model loaded: {})", health.status, loaded),
                )
                .await?;
            }
            Err(e) => write_line(output, &format!("Error: {}", e.panel_message())).await?,
        },
        Command::Help => output.write_all(HELP_TEXT.as_bytes()).await?,
        Command::Quit => {}
    }

    output.flush().await?;
    Ok(())
}

async fn write_form<W>(controller: &FormController, output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for field in FormField::ALL {
        let value = controller.form().get(field);
        let shown = if value.is_empty() { "(empty)" } else { value };
        write_line(
            output,
            &format!("  {:<12} {:<18} {}", field.name(), field.label(), shown),
        )
        .await?;
    }
    Ok(())
}

async fn write_line<W>(output: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    Ok(())
}
