//! search.rs
//!
//! Поиск отелей для мобильного клиента: фильтрация, сортировка по цене и
//! постраничная выдача. Все функции чистые и работают над уже загруженной
//! коллекцией отелей.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;
use crate::models::{Hotel, HotelStatus, RecordId, StayMode};

/// Ценовой диапазон по `basePrice`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceBracket {
    #[default]
    All,
    /// 0 ≤ p < 300
    Budget,
    /// 300 ≤ p < 600
    Mid,
    /// p ≥ 600
    Premium,
}

impl PriceBracket {
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceBracket::All => true,
            PriceBracket::Budget => (0.0..300.0).contains(&price),
            PriceBracket::Mid => (300.0..600.0).contains(&price),
            PriceBracket::Premium => price >= 600.0,
        }
    }
}

impl FromStr for PriceBracket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(PriceBracket::All),
            "0-300" => Ok(PriceBracket::Budget),
            "300-600" => Ok(PriceBracket::Mid),
            "600+" | "600-" => Ok(PriceBracket::Premium),
            other => Err(AppError::Validation(format!("未知的价格区间: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "priceAsc")]
    PriceAsc,
    #[serde(rename = "priceDesc")]
    PriceDesc,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub city: Option<String>,
    pub keyword: Option<String>,
    pub min_star: Option<u8>,
    pub price: PriceBracket,
    pub tags: Vec<String>,
    pub stay_mode: StayMode,
}

impl SearchFilter {
    /// Конъюнкция всех условий; внутри набора тегов - дизъюнкция
    pub fn matches(&self, hotel: &Hotel) -> bool {
        hotel.status == HotelStatus::Published
            && self.matches_city(hotel)
            && self.matches_stay_mode(hotel)
            && self.matches_keyword(hotel)
            && self.min_star.map_or(true, |min| hotel.star >= min)
            && self.price.contains(hotel.base_price)
            && self.matches_tags(hotel)
    }

    fn matches_city(&self, hotel: &Hotel) -> bool {
        match self.city.as_deref() {
            Some(city) => hotel.address.contains(city),
            None => true,
        }
    }

    fn matches_stay_mode(&self, hotel: &Hotel) -> bool {
        match self.stay_mode {
            StayMode::Hourly => hotel.has_hourly_room(),
            StayMode::Overnight => true,
        }
    }

    fn matches_keyword(&self, hotel: &Hotel) -> bool {
        let keyword = match self.keyword.as_deref() {
            Some(k) => k.to_lowercase(),
            None => return true,
        };
        let hit = |text: &str| text.to_lowercase().contains(&keyword);

        hit(&hotel.name_zh)
            || hit(&hotel.name_en)
            || hit(&hotel.address)
            || hotel.tags.iter().any(|t| hit(t))
            || hotel.rooms.iter().any(|r| hit(&r.name))
    }

    fn matches_tags(&self, hotel: &Hotel) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| hotel.tags.contains(tag))
    }
}

pub fn filter_hotels<'a>(hotels: &'a [Hotel], filter: &SearchFilter) -> Vec<&'a Hotel> {
    hotels.iter().filter(|h| filter.matches(h)).collect()
}

/// Стабильная сортировка: отели с одинаковой ценой сохраняют порядок
pub fn sort_by_price(hotels: &mut [&Hotel], order: SortOrder) {
    match order {
        SortOrder::PriceAsc => hotels.sort_by(|a, b| a.base_price.total_cmp(&b.base_price)),
        SortOrder::PriceDesc => hotels.sort_by(|a, b| b.base_price.total_cmp(&a.base_price)),
    }
}

/// Окно выдачи: первые `page * page_size` элементов
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    pub total: usize,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

pub fn paginate<T: Clone>(sorted: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let visible = page.saturating_mul(page_size).min(sorted.len());
    Page {
        items: sorted[..visible].to_vec(),
        page,
        page_size,
        total: sorted.len(),
        has_more: visible < sorted.len(),
    }
}

pub fn average_price(hotels: &[&Hotel]) -> i64 {
    if hotels.is_empty() {
        return 0;
    }
    let sum: f64 = hotels.iter().map(|h| h.base_price).sum();
    (sum / hotels.len() as f64).round() as i64
}

/// Карточка отеля в выдаче
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelCard {
    pub id: RecordId,
    pub name_zh: String,
    pub name_en: String,
    pub address: String,
    pub star: u8,
    #[serde(rename = "basePrice")]
    pub base_price: f64,
    pub tags: Vec<String>,
    #[serde(rename = "mainImage")]
    pub main_image: String,
    #[serde(rename = "hasHourly")]
    pub has_hourly: bool,
}

impl From<&Hotel> for HotelCard {
    fn from(h: &Hotel) -> Self {
        Self {
            id: h.id.clone(),
            name_zh: h.name_zh.clone(),
            name_en: h.name_en.clone(),
            address: h.address.clone(),
            star: h.star,
            base_price: h.base_price,
            tags: h.tags.clone(),
            main_image: h.main_image.clone(),
            has_hourly: h.has_hourly_room(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub page: Page<HotelCard>,
    #[serde(rename = "averagePrice")]
    pub average_price: i64,
    #[serde(rename = "stayMode")]
    pub stay_mode: StayMode,
    pub sort: SortOrder,
}

/// Полный конвейер: фильтр → сортировка → окно
pub fn search(
    hotels: &[Hotel],
    filter: &SearchFilter,
    sort: SortOrder,
    page: usize,
    page_size: usize,
) -> SearchResult {
    let mut matched = filter_hotels(hotels, filter);
    let average_price = average_price(&matched);
    sort_by_price(&mut matched, sort);

    let cards: Vec<HotelCard> = matched.into_iter().map(HotelCard::from).collect();
    SearchResult {
        page: paginate(&cards, page, page_size),
        average_price,
        stay_mode: filter.stay_mode,
        sort,
    }
}

/// Параметры строки запроса списка: `?city=&keyword=&minStar=&price=&tags=a,b&stayMode=&sort=&page=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub city: Option<String>,
    pub keyword: Option<String>,
    #[serde(rename = "minStar")]
    pub min_star: Option<String>,
    pub price: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "stayMode")]
    pub stay_mode: Option<StayMode>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SearchQuery {
    pub fn to_filter(&self) -> Result<SearchFilter, AppError> {
        let min_star = match non_empty(&self.min_star).as_deref() {
            None | Some("all") => None,
            Some(raw) => Some(
                raw.parse::<u8>()
                    .map_err(|_| AppError::Validation(format!("无效的星级: {}", raw)))?,
            ),
        };

        let tags = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(SearchFilter {
            city: non_empty(&self.city),
            keyword: non_empty(&self.keyword),
            min_star,
            price: self.price.as_deref().unwrap_or("all").parse()?,
            tags,
            stay_mode: self.stay_mode.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hotel(id: i64, price: f64, extra: serde_json::Value) -> Hotel {
        let mut value = json!({
            "id": id,
            "name_zh": format!("酒店{}", id),
            "name_en": format!("Hotel {}", id),
            "address": "Shanghai Pudong",
            "star": 4,
            "basePrice": price,
            "status": "published",
        });
        if let (Some(base), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(value).unwrap()
    }

    fn ids(cards: &[HotelCard]) -> Vec<RecordId> {
        cards.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn only_published_hotels_are_listed() {
        let hotels = vec![
            hotel(1, 100.0, json!({})),
            hotel(2, 100.0, json!({ "status": "pending" })),
            hotel(3, 100.0, json!({ "status": "offline" })),
        ];
        let result = filter_hotels(&hotels, &SearchFilter::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, RecordId::Int(1));
    }

    #[test]
    fn keyword_matches_names_tags_and_rooms_case_insensitively() {
        let hotels = vec![
            hotel(1, 100.0, json!({ "name_en": "Joy HOTEL Lujiazui" })),
            hotel(2, 100.0, json!({ "tags": ["亲子", "Pool"] })),
            hotel(3, 100.0, json!({ "rooms": [{ "id": 1, "name": "Deluxe Suite", "price": 900 }] })),
            hotel(4, 100.0, json!({})),
        ];

        let find = |kw: &str| {
            let filter = SearchFilter { keyword: Some(kw.to_string()), ..Default::default() };
            filter_hotels(&hotels, &filter).iter().map(|h| h.id.clone()).collect::<Vec<_>>()
        };

        assert_eq!(find("lujiazui"), vec![RecordId::Int(1)]);
        assert_eq!(find("pool"), vec![RecordId::Int(2)]);
        assert_eq!(find("SUITE"), vec![RecordId::Int(3)]);
        assert_eq!(find("pudong").len(), 4);
    }

    #[test]
    fn city_star_price_and_tags_combine() {
        let hotels = vec![
            hotel(1, 250.0, json!({ "tags": ["亲子"] })),
            hotel(2, 450.0, json!({ "tags": ["豪华"], "star": 5 })),
            hotel(3, 650.0, json!({ "tags": ["豪华"], "star": 5 })),
            hotel(4, 450.0, json!({ "address": "Beijing Chaoyang", "tags": ["豪华"], "star": 5 })),
            hotel(5, 450.0, json!({ "star": 3, "tags": ["豪华"] })),
        ];
        let filter = SearchFilter {
            city: Some("Shanghai".into()),
            min_star: Some(4),
            price: PriceBracket::Mid,
            tags: vec!["豪华".into(), "商务".into()],
            ..Default::default()
        };
        let result = filter_hotels(&hotels, &filter);
        assert_eq!(result.iter().map(|h| h.id.clone()).collect::<Vec<_>>(), vec![RecordId::Int(2)]);
    }

    #[test]
    fn hotels_without_tags_never_match_a_tag_set() {
        let hotels = vec![hotel(1, 100.0, json!({ "tags": null }))];
        let filter = SearchFilter { tags: vec!["亲子".into()], ..Default::default() };
        assert!(filter_hotels(&hotels, &filter).is_empty());
    }

    #[test]
    fn hourly_mode_requires_an_hourly_room() {
        let hotels = vec![
            hotel(1, 100.0, json!({ "rooms": [{ "id": 1, "name": "钟点房", "price": 80, "isHourly": true }] })),
            hotel(2, 100.0, json!({ "rooms": [{ "id": 2, "name": "大床房", "price": 300 }] })),
        ];
        let hourly = SearchFilter { stay_mode: StayMode::Hourly, ..Default::default() };
        assert_eq!(filter_hotels(&hotels, &hourly).len(), 1);
        assert_eq!(filter_hotels(&hotels, &SearchFilter::default()).len(), 2);
    }

    #[test]
    fn price_bracket_edges() {
        assert!(PriceBracket::Budget.contains(0.0));
        assert!(!PriceBracket::Budget.contains(300.0));
        assert!(PriceBracket::Mid.contains(300.0));
        assert!(!PriceBracket::Mid.contains(600.0));
        assert!(PriceBracket::Premium.contains(600.0));
        assert_eq!("600-".parse::<PriceBracket>().unwrap(), PriceBracket::Premium);
        assert!("cheap".parse::<PriceBracket>().is_err());
    }

    #[test]
    fn sort_keeps_equal_prices_in_input_order() {
        let hotels = vec![
            hotel(1, 300.0, json!({})),
            hotel(2, 100.0, json!({})),
            hotel(3, 300.0, json!({})),
            hotel(4, 500.0, json!({})),
        ];

        let asc = search(&hotels, &SearchFilter::default(), SortOrder::PriceAsc, 1, 10);
        assert_eq!(ids(&asc.page.items), [2, 1, 3, 4].map(RecordId::Int).to_vec());

        let desc = search(&hotels, &SearchFilter::default(), SortOrder::PriceDesc, 1, 10);
        assert_eq!(ids(&desc.page.items), [4, 1, 3, 2].map(RecordId::Int).to_vec());
        assert_eq!(desc.average_price, 300);
    }

    #[test]
    fn pagination_grows_by_page_size() {
        let hotels: Vec<Hotel> = (1..=25).map(|i| hotel(i, i as f64, json!({}))).collect();

        let first = search(&hotels, &SearchFilter::default(), SortOrder::PriceAsc, 1, 10);
        assert_eq!(first.page.items.len(), 10);
        assert!(first.page.has_more);

        let third = search(&hotels, &SearchFilter::default(), SortOrder::PriceAsc, 3, 10);
        assert_eq!(third.page.items.len(), 25);
        assert!(!third.page.has_more);
        assert_eq!(third.page.total, 25);

        let zero = paginate(&[1, 2, 3], 0, 2);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, vec![1, 2]);
    }

    #[test]
    fn query_string_is_parsed_into_filter() {
        let query = SearchQuery {
            city: Some("Shanghai".into()),
            keyword: Some("  ".into()),
            min_star: Some("all".into()),
            price: Some("300-600".into()),
            tags: Some("亲子, 豪华,,".into()),
            stay_mode: Some(StayMode::Hourly),
            ..Default::default()
        };
        let filter = query.to_filter().unwrap();
        assert_eq!(filter.keyword, None);
        assert_eq!(filter.min_star, None);
        assert_eq!(filter.price, PriceBracket::Mid);
        assert_eq!(filter.tags, vec!["亲子".to_string(), "豪华".to_string()]);
        assert_eq!(filter.stay_mode, StayMode::Hourly);

        let bad = SearchQuery { min_star: Some("five".into()), ..Default::default() };
        assert!(bad.to_filter().is_err());
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    const TAGS: [&str; 4] = ["亲子", "豪华", "商务", "海景"];
    const CITIES: [&str; 3] = ["Shanghai", "Beijing", "Shenzhen"];

    fn arb_hotel() -> impl Strategy<Value = Hotel> {
        (
            0usize..3,
            3u8..=5,
            0u32..900,
            proptest::sample::subsequence(TAGS.to_vec(), 0..=3),
            proptest::bool::ANY,
            0usize..4,
            "[a-zA-Z]{0,6}",
        )
            .prop_map(|(city, star, price, tags, hourly, status, name)| Hotel {
                id: RecordId::Int(0),
                name_zh: name.clone(),
                name_en: name,
                address: format!("{} Road 1", CITIES[city]),
                star,
                base_price: f64::from(price),
                open_date: String::new(),
                tags: tags.into_iter().map(str::to_string).collect(),
                main_image: String::new(),
                surroundings: String::new(),
                rooms: vec![crate::models::Room {
                    id: RecordId::Int(1),
                    name: "Room".into(),
                    price: f64::from(price),
                    is_hourly: hourly,
                }],
                status: HotelStatus::ALL[status],
                reject_reason: String::new(),
                created_by: "m".into(),
                created_at: String::new(),
                operation_history: Vec::new(),
            })
    }

    fn arb_hotels() -> impl Strategy<Value = Vec<Hotel>> {
        proptest::collection::vec(arb_hotel(), 0..40).prop_map(|mut hotels| {
            for (i, h) in hotels.iter_mut().enumerate() {
                h.id = RecordId::Int(i as i64);
            }
            hotels
        })
    }

    fn arb_filter() -> impl Strategy<Value = SearchFilter> {
        (
            proptest::option::of(0usize..3),
            proptest::option::of("[a-zA-Z]{1,2}"),
            proptest::option::of(3u8..=5),
            0usize..4,
            proptest::sample::subsequence(TAGS.to_vec(), 0..=2),
            proptest::bool::ANY,
        )
            .prop_map(|(city, keyword, min_star, price, tags, hourly)| SearchFilter {
                city: city.map(|c| CITIES[c].to_string()),
                keyword,
                min_star,
                price: [PriceBracket::All, PriceBracket::Budget, PriceBracket::Mid, PriceBracket::Premium][price],
                tags: tags.into_iter().map(str::to_string).collect(),
                stay_mode: if hourly { StayMode::Hourly } else { StayMode::Overnight },
            })
    }

    proptest! {
        #[test]
        fn result_is_subset_satisfying_every_predicate(hotels in arb_hotels(), filter in arb_filter()) {
            let result = filter_hotels(&hotels, &filter);
            for h in &result {
                prop_assert!(hotels.iter().any(|x| x.id == h.id));
                prop_assert_eq!(h.status, HotelStatus::Published);
                if let Some(city) = &filter.city {
                    prop_assert!(h.address.contains(city.as_str()));
                }
                if let Some(min) = filter.min_star {
                    prop_assert!(h.star >= min);
                }
                prop_assert!(filter.price.contains(h.base_price));
                if !filter.tags.is_empty() {
                    prop_assert!(filter.tags.iter().any(|t| h.tags.contains(t)));
                }
                if filter.stay_mode == StayMode::Hourly {
                    prop_assert!(h.has_hourly_room());
                }
                if let Some(keyword) = &filter.keyword {
                    prop_assert!(keyword_hit(h, keyword));
                }
            }
            // Ничего подходящего не потеряно
            let expected = hotels.iter().filter(|h| satisfies_all(h, &filter)).count();
            prop_assert_eq!(result.len(), expected);
        }

        #[test]
        fn sort_is_stable_in_both_directions(hotels in arb_hotels(), desc in proptest::bool::ANY) {
            let order = if desc { SortOrder::PriceDesc } else { SortOrder::PriceAsc };
            let mut list: Vec<&Hotel> = hotels.iter().collect();
            sort_by_price(&mut list, order);
            for pair in list.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.base_price == b.base_price {
                    // id совпадает с исходной позицией
                    prop_assert!(a.id_index() < b.id_index());
                } else if desc {
                    prop_assert!(a.base_price > b.base_price);
                } else {
                    prop_assert!(a.base_price < b.base_price);
                }
            }
        }

        #[test]
        fn visible_count_matches_page_window(len in 0usize..60, page in 1usize..8, page_size in 1usize..15) {
            let items: Vec<usize> = (0..len).collect();
            let window = paginate(&items, page, page_size);
            prop_assert_eq!(window.items.len(), (page * page_size).min(len));
            prop_assert_eq!(window.has_more, window.items.len() < len);
        }
    }

    fn keyword_hit(h: &Hotel, keyword: &str) -> bool {
        let k = keyword.to_lowercase();
        let mut fields = vec![h.name_zh.as_str(), h.name_en.as_str(), h.address.as_str()];
        fields.extend(h.tags.iter().map(String::as_str));
        fields.extend(h.rooms.iter().map(|r| r.name.as_str()));
        fields.iter().any(|f| f.to_lowercase().contains(&k))
    }

    // Эталонный предикат, собранный независимо от SearchFilter::matches
    fn satisfies_all(h: &Hotel, filter: &SearchFilter) -> bool {
        let in_price = match filter.price {
            PriceBracket::All => true,
            PriceBracket::Budget => h.base_price >= 0.0 && h.base_price < 300.0,
            PriceBracket::Mid => h.base_price >= 300.0 && h.base_price < 600.0,
            PriceBracket::Premium => h.base_price >= 600.0,
        };
        h.status == HotelStatus::Published
            && filter.city.as_ref().map_or(true, |c| h.address.contains(c.as_str()))
            && filter.keyword.as_ref().map_or(true, |k| keyword_hit(h, k))
            && filter.min_star.map_or(true, |m| h.star >= m)
            && in_price
            && (filter.tags.is_empty() || h.tags.iter().any(|t| filter.tags.contains(t)))
            && (filter.stay_mode == StayMode::Overnight || h.rooms.iter().any(|r| r.is_hourly))
    }

    trait IdIndex {
        fn id_index(&self) -> i64;
    }

    impl IdIndex for Hotel {
        fn id_index(&self) -> i64 {
            match self.id {
                RecordId::Int(i) => i,
                RecordId::Text(_) => -1,
            }
        }
    }
}
