//! List posts from the content source

use anyhow::Result;

use crate::listing::ListingFeed;
use crate::Starlog;

/// Page through the whole listing and print every post
pub async fn run(app: &Starlog) -> Result<()> {
    let client = app.cms_client();
    let mut feed = ListingFeed::build(&client, &app.config).await?;

    let mut printed = 0;
    loop {
        for entry in &feed.entries()[printed..] {
            println!(
                "  {} - {} [{}]",
                entry.display_date.as_deref().unwrap_or("unpublished"),
                entry.title,
                entry.uid
            );
        }
        printed = feed.entries().len();

        if !feed.load_more(&client).await? {
            break;
        }
    }

    println!("Posts ({})", printed);
    Ok(())
}
