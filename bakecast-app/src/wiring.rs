use anyhow::{Context, Result, bail};
use bakecast_config::{BakecastConfig, SourceConfig, TwitterConfig};
use bakecast_poster::{Poster, RandomPicker};
use bakecast_social::twitter::{TwitterApi, TwitterCredentials};
use bakecast_wordpress::{PostQuery, SortOrder, WordPressApi};
use std::time::Duration;

pub type AppPoster = Poster<WordPressApi, TwitterApi>;

pub fn query_from(source: &SourceConfig) -> Result<PostQuery> {
    let Some(order) = SortOrder::parse(&source.order) else {
        bail!("source.order must be ASC or DESC, got {:?}", source.order);
    };
    Ok(PostQuery {
        site: source.site.clone(),
        post_type: source.post_type.clone(),
        number: source.number,
        order,
    })
}

fn credentials_from(tw: &TwitterConfig) -> TwitterCredentials {
    TwitterCredentials {
        consumer_key: tw.consumer_key.clone(),
        consumer_secret: tw.consumer_secret.clone(),
        access_token: tw.access_token.clone(),
        access_token_secret: tw.access_token_secret.clone(),
    }
}

pub fn build_poster(cfg: &BakecastConfig, seed: Option<u64>) -> Result<AppPoster> {
    let timeout = Duration::from_secs(cfg.http.timeout_secs.max(1));

    let wordpress = WordPressApi::with_endpoint(&cfg.source.endpoint)
        .context("invalid source.endpoint")?
        .with_timeout(timeout);
    let twitter = TwitterApi::new(credentials_from(&cfg.twitter))?.with_timeout(timeout);

    let picker = match seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::new(),
    };

    Ok(Poster::new(wordpress, twitter, query_from(&cfg.source)?)
        .with_picker(picker)
        .with_image_marker(cfg.source.image_marker.clone()))
}
