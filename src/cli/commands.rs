use crate::app::{AppContext, Result};
use crate::domain::{all_sources, FilterSet, UnifiedArticle, UnifiedResponse};
use crate::preferences::FeedPreferences;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub limit: Option<usize>,
}

pub async fn top_stories(ctx: &AppContext, output: Output) -> Result<()> {
    let response = ctx.aggregator.fetch_all_top_stories().await?;
    print_response(response, output)
}

pub async fn search(ctx: &AppContext, filters: &FilterSet, output: Output) -> Result<()> {
    let response = ctx.aggregator.search_all_sources(filters).await?;
    print_response(response, output)
}

pub async fn sections(ctx: &AppContext, output: Output) -> Result<()> {
    let sections = ctx.aggregator.guardian_sections().await;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!("No sections available");
        return Ok(());
    }

    for section in sections {
        println!("{:<24} {}", section.id, section.web_title);
    }
    Ok(())
}

pub fn sources(output: Output) -> Result<()> {
    let sources = all_sources();

    if output.json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    for source in sources {
        println!("{:<10} {}", source.id, source.display_name);
    }
    Ok(())
}

/// Search with the saved preferences, or top stories when none are saved.
pub async fn feed(ctx: &AppContext, output: Output) -> Result<()> {
    match ctx.preferences.load()? {
        Some(prefs) => {
            tracing::debug!("Personalized feed with {:?}", prefs);
            search(ctx, &prefs.to_filters(), output).await
        }
        None => {
            if !output.json {
                println!("No preferences saved; showing top stories\n");
            }
            top_stories(ctx, output).await
        }
    }
}

pub fn show_preferences(ctx: &AppContext, output: Output) -> Result<()> {
    let prefs = ctx.preferences.load()?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&prefs.unwrap_or_default())?);
        return Ok(());
    }

    match prefs {
        Some(prefs) => {
            println!("Categories: {}", prefs.categories.as_deref().unwrap_or("(any)"));
            println!("Sources:    {}", prefs.sources.as_deref().unwrap_or("(all)"));
        }
        None => println!("No preferences saved"),
    }
    Ok(())
}

pub fn set_preferences(ctx: &AppContext, categories: Option<String>, sources: Option<String>) -> Result<()> {
    let prefs = FeedPreferences::new(categories, sources);

    if prefs.is_empty() {
        ctx.preferences.clear()?;
        println!("Preferences cleared");
    } else {
        ctx.preferences.save(&prefs)?;
        println!("Preferences saved to {}", ctx.preferences.path().display());
    }
    Ok(())
}

pub fn clear_preferences(ctx: &AppContext) -> Result<()> {
    ctx.preferences.clear()?;
    println!("Preferences cleared");
    Ok(())
}

fn print_response(mut response: UnifiedResponse, output: Output) -> Result<()> {
    if let Some(limit) = output.limit {
        response.articles.truncate(limit);
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.is_empty() {
        println!("No articles");
        return Ok(());
    }

    for article in &response.articles {
        println!("{}", format_article(article));
    }

    println!(
        "\nShowing {} of {} results from {}",
        response.articles.len(),
        response.total_results,
        if response.sources.is_empty() {
            "no sources".to_string()
        } else {
            response.sources.join(", ")
        }
    );
    Ok(())
}

fn format_article(article: &UnifiedArticle) -> String {
    let date = article
        .published_timestamp()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());

    let mut line = format!("{} [{}] {}", date, article.source().name, article.title());
    if let Some(author) = article.author() {
        line.push_str(&format!(" ({})", author));
    }
    line.push_str(&format!("\n  {}", article.url()));
    line
}
