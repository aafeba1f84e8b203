use quip_http::{NewDocumentParams, QuipClient, RecentThreadsParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let quip = QuipClient::from_env().map_err(anyhow::Error::msg)?;

    let me = quip.get_authenticated_user().await?;
    println!("signed in as {} ({})", me.name, me.id);

    let doc = quip
        .new_document(&NewDocumentParams {
            title: Some("Scratch".to_owned()),
            ..NewDocumentParams::new("<p>Created from quip-http</p>")
        })
        .await?;
    println!("created {}", doc.thread.link);

    let recent = quip
        .get_recent_threads(&RecentThreadsParams {
            count: Some(5),
            ..RecentThreadsParams::default()
        })
        .await?;
    for thread in recent {
        println!("{} {}", thread.thread.id, thread.thread.title);
    }

    println!(
        "waited {:?} on rate limits",
        quip.total_rate_limit_delay()
    );
    Ok(())
}
