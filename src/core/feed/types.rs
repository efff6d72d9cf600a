use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub category: String,
    pub pub_date: String,
    pub thumbnail: Thumbnail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: Channel,
}

/// Flat projection of a [`FeedItem`] served to API clients.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub description: String,
    pub link: String,
    pub category: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub thumbnail: String,
}

impl From<&FeedItem> for ArticleRecord {
    fn from(item: &FeedItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            link: item.link.clone(),
            category: item.category.clone(),
            pub_date: item.pub_date.clone(),
            thumbnail: item.thumbnail.url.clone(),
        }
    }
}

/// Ordered article records of one feed.
///
/// The list is only allocated once a record is pushed, so a feed without
/// items serializes as `null` rather than `[]`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ArticleList(Option<Vec<ArticleRecord>>);

impl ArticleList {
    pub fn from_feed(feed: &FeedDocument) -> Self {
        let mut list = Self::default();
        for item in &feed.channel.items {
            list.push(ArticleRecord::from(item));
        }
        list
    }

    pub fn push(&mut self, record: ArticleRecord) {
        self.0.get_or_insert_with(Vec::new).push(record);
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> &[ArticleRecord] {
        self.0.as_deref().unwrap_or_default()
    }
}
