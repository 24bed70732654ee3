//! About page

use anyhow::Result;
use chrono::Datelike;

use crate::output::{Output, OutputFormat};

pub const APP_TITLE: &str = "Design Bookshelf";

pub const TAGLINE: &str = "Curated knowledge for the modern UI/UX professional.";

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "Design tools come and go every week, each claiming to do everything better. \
     The fundamentals in these books do not change.",
    "Knowing those principles is what lets you direct new tools with precision \
     instead of being replaced by them.",
    "This curated collection is meant to help you build a lasting foundation for \
     your design career.",
    "Affiliate disclosure: purchase links may be affiliate links. Using them costs \
     you nothing extra.",
];

/// Footer line with the current year
pub fn footer() -> String {
    format!(
        "© {} {}. Knowledge is power.",
        chrono::Local::now().year(),
        APP_TITLE
    )
}

/// Print the about page
pub fn show(output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "title": APP_TITLE,
                    "tagline": TAGLINE,
                    "about": ABOUT_PARAGRAPHS,
                    "footer": footer(),
                })
            );
        }
        OutputFormat::Quiet => {}
        OutputFormat::Human => {
            println!("{}", APP_TITLE);
            println!("{}", TAGLINE);
            println!();
            for paragraph in ABOUT_PARAGRAPHS {
                println!("{}", paragraph);
                println!();
            }
            println!("{}", footer());
        }
    }
    Ok(())
}
