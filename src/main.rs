use clap::{Parser, Subcommand};
use env_logger::Env;
use folio::contact::{self, ContactForm, Field, Outcome};
use folio::gateway::{EmailJsGateway, MailCredentials};
use folio::{config, content, generate, output};
use std::path::Path;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Single-page portfolio site generator")]
#[command(long_about = "\
Single-page portfolio site generator

All biographical content lives in one JSON document. The build renders it
into a self-contained index.html with smooth section navigation, code
dialogs, and a contact form backed by a hosted mail relay.

Content structure:

  content/
  ├── data.json          # Profile, experience, education, projects, lists
  ├── config.toml        # Site config (optional)
  └── assets/            # Copied to output root (resume.pdf, profile.jpg)

Mail relay credentials may also come from the environment:
  FOLIO_MAIL_SERVICE_ID, FOLIO_MAIL_TEMPLATE_ID, FOLIO_MAIL_TOKEN

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate content and config without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Send a contact message through the configured mail relay
    Send {
        /// Sender name
        #[arg(long)]
        name: String,
        /// Sender reply-to address
        #[arg(long)]
        email: String,
        /// Message body
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (portfolio, site_config) = load(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&portfolio, &site_config, &cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (portfolio, site_config) = load(&cli.source)?;
            output::print_check_output(&portfolio, &site_config, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Send {
            name,
            email,
            message,
        } => {
            let (portfolio, site_config) = load(&cli.source)?;
            let mut form = ContactForm::new(MailCredentials::resolve(&site_config.mail)?);
            form.edit(Field::Name, name);
            form.edit(Field::Email, email);
            form.edit(Field::Message, message);

            let missing = form.draft().missing_fields();
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
                return Err(format!("required fields are empty: {}", names.join(", ")).into());
            }

            let gateway = EmailJsGateway::from_config(&site_config.mail)?;
            match form.submit(&gateway)? {
                Outcome::Sent => println!("{}", contact::success_title(&portfolio.profile.name)),
                Outcome::Failed => return Err(contact::FAILURE_NOTICE.into()),
            }
        }
    }

    Ok(())
}

fn load(source: &Path) -> Result<(content::Portfolio, config::SiteConfig), Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let portfolio = content::load_content(source)?;
    Ok((portfolio, site_config))
}
