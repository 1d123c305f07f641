//! Static news set served when the news provider cannot be reached.

use chrono::{SecondsFormat, Utc};

use super::{Article, ArticleSource};

struct FallbackItem {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    image: &'static str,
    source: &'static str,
    content: &'static str,
}

const FALLBACK_ITEMS: &[FallbackItem] = &[
    FallbackItem {
        title: "COP29 Summit Reaches Historic Agreement on Climate Finance",
        description: "World leaders commit to $300 billion annual climate fund to support developing nations in green transition and adaptation efforts.",
        url: "https://www.un.org/climatechange",
        image: "https://images.unsplash.com/photo-1569163139394-de4798aa62b6?auto=format&fit=crop&w=800&q=80",
        source: "UN Climate Change",
        content: "Global climate summit achieves breakthrough agreement",
    },
    FallbackItem {
        title: "Amazon Rainforest Deforestation Drops 22% Following New Protection Measures",
        description: "Brazil reports significant decline in deforestation rates after implementing enhanced satellite monitoring and indigenous land rights protections.",
        url: "https://news.mongabay.com/",
        image: "https://images.unsplash.com/photo-1516026672322-bc52d61a55d5?auto=format&fit=crop&w=800&q=80",
        source: "Mongabay",
        content: "Conservation efforts show promising results",
    },
    FallbackItem {
        title: "Revolutionary Carbon Capture Technology Reaches Commercial Scale",
        description: "New direct air capture facility in Iceland successfully removes 1,000 tons of CO2 monthly, offering hope for climate mitigation.",
        url: "https://www.sciencedaily.com/",
        image: "https://images.unsplash.com/photo-1473341304170-971dccb5ac1e?auto=format&fit=crop&w=800&q=80",
        source: "Science Daily",
        content: "Breakthrough in carbon removal technology",
    },
    FallbackItem {
        title: "Ocean Plastic Cleanup Systems Remove 200 Tons in First Year",
        description: "The Ocean Cleanup project surpasses expectations, successfully extracting massive amounts of plastic waste from the Great Pacific Garbage Patch.",
        url: "https://theoceancleanup.com/",
        image: "https://images.unsplash.com/photo-1621451537084-482c73073a0f?auto=format&fit=crop&w=800&q=80",
        source: "The Ocean Cleanup",
        content: "Marine conservation milestone achieved",
    },
    FallbackItem {
        title: "Global Renewable Energy Capacity Surpasses Fossil Fuels for First Time",
        description: "Historic shift as solar and wind installations worldwide exceed coal and gas generation capacity, signaling energy transition acceleration.",
        url: "https://www.iea.org/",
        image: "https://images.unsplash.com/photo-1509391366360-2e959784a276?auto=format&fit=crop&w=800&q=80",
        source: "International Energy Agency",
        content: "Renewable energy reaches new milestone",
    },
];

/// The bundled fallback articles, stamped with the current time.
pub fn fallback_articles() -> Vec<Article> {
    let published_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    FALLBACK_ITEMS
        .iter()
        .map(|item| Article {
            title: item.title.to_string(),
            description: item.description.to_string(),
            url: item.url.to_string(),
            image: item.image.to_string(),
            source: ArticleSource { name: item.source.to_string(), url: None },
            published_at: published_at.clone(),
            content: item.content.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_set_is_complete() {
        let articles = fallback_articles();
        assert_eq!(articles.len(), 5);
        assert!(articles.iter().all(|a| !a.title.is_empty() && !a.image.is_empty()));
        assert_eq!(articles[0].source.name, "UN Climate Change");
    }
}
