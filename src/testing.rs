//! Canned sites for exercising the pipelines without a network.

use crate::browser::{MemorySource, StaticBrowser};

pub const CATALOG_START: &str = "https://books.test/index.html";
pub const NEWS_URL: &str = "https://mars.test/news/";
pub const HEMI_URL: &str = "https://hemi.test/search/results?q=hemisphere+enhanced";
pub const IMAGES_URL: &str = "https://jpl.test/images?category=Mars";
pub const IMAGE_ORIGIN: &str = "https://jpl.test";

pub struct Book<'a> {
    pub listing_text: &'a str,
    pub href: &'a str,
    pub title: &'a str,
    pub category: &'a str,
    pub price: &'a str,
    pub rating: &'a str,
    pub availability: &'a str,
    pub upc: &'a str,
    pub reviews: &'a str,
}

pub fn listing_page(books: &[Book<'_>], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><ol class=\"row\">");
    for book in books {
        html.push_str(&format!(
            r#"<li><article class="product_pod">
                <div class="image_container"><a href="{href}"><img src="t.jpg" alt="{title}"></a></div>
                <p class="star-rating {rating}"></p>
                <h3><a href="{href}" title="{title}">{text}</a></h3>
            </article></li>"#,
            href = book.href,
            title = book.title,
            rating = book.rating,
            text = book.listing_text,
        ));
    }
    html.push_str("</ol><ul class=\"pager\">");
    if let Some(next) = next {
        html.push_str(&format!("<li class=\"next\"><a href=\"{next}\">next</a></li>"));
    }
    html.push_str("</ul></body></html>");
    html
}

pub fn detail_page(book: &Book<'_>) -> String {
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
            <li><a href="/index.html">Home</a></li>
            <li><a href="/catalogue/category/books_1/index.html">Books</a></li>
            <li><a href="/catalogue/category/books/x/index.html">{category}</a></li>
            <li class="active">{title}</li>
        </ul>
        <div class="col-sm-6 product_main">
            <h1>{title}</h1>
            <p class="price_color">{price}</p>
            <p class="instock availability">
                <i class="icon-ok"></i>
                {availability}
            </p>
            <p class="star-rating {rating}"><i class="icon-star"></i></p>
        </div>
        <table class="table table-striped">
            <tr><th>UPC</th><td>{upc}</td></tr>
            <tr><th>Product Type</th><td>Books</td></tr>
            <tr><th>Number of reviews</th><td>{reviews}</td></tr>
        </table>
        </body></html>"#,
        category = book.category,
        title = book.title,
        price = book.price,
        availability = book.availability,
        rating = book.rating,
        upc = book.upc,
        reviews = book.reviews,
    )
}

pub fn attic() -> Book<'static> {
    Book {
        listing_text: "A Light in the ...",
        href: "catalogue/a-light-in-the-attic_1000/index.html",
        title: "A Light in the Attic",
        category: "Poetry",
        price: "£51.77",
        rating: "Three",
        availability: "In stock (22 available)",
        upc: "a897fe39b1053632",
        reviews: "0",
    }
}

pub fn velvet() -> Book<'static> {
    Book {
        listing_text: "Tipping the Velvet",
        href: "catalogue/tipping-the-velvet_999/index.html",
        title: "Tipping the Velvet",
        category: "Historical Fiction",
        price: "£53.74",
        rating: "One",
        availability: "In stock",
        upc: "90fa61229261140a",
        reviews: "3",
    }
}

pub fn sharp_objects() -> Book<'static> {
    Book {
        listing_text: "Sharp Objects, Vol. 1",
        href: "sharp-objects_997/index.html",
        title: "Sharp Objects, Vol. 1",
        category: "Mystery",
        price: "£47.82",
        rating: "Four",
        availability: "In stock (20 available)",
        upc: "e00eb4fd7b871a48",
        reviews: "1",
    }
}

/// Two listing pages; the second one links a detail page that does not exist.
pub fn catalog_source() -> MemorySource {
    let missing = Book {
        listing_text: "Gone Missing",
        href: "gone-missing_1/index.html",
        ..sharp_objects()
    };

    MemorySource::new()
        .with_page(
            CATALOG_START,
            listing_page(&[attic(), velvet()], Some("catalogue/page-2.html")),
        )
        .with_page(
            "https://books.test/catalogue/page-2.html",
            listing_page(&[sharp_objects(), missing], None),
        )
        .with_page(
            "https://books.test/catalogue/a-light-in-the-attic_1000/index.html",
            detail_page(&attic()),
        )
        .with_page(
            "https://books.test/catalogue/tipping-the-velvet_999/index.html",
            detail_page(&velvet()),
        )
        .with_page(
            "https://books.test/catalogue/sharp-objects_997/index.html",
            detail_page(&sharp_objects()),
        )
}

pub fn news_page(count: usize) -> String {
    let mut html = String::from("<html><body><ul class=\"item_list\">");
    for i in 1..=count {
        html.push_str(&format!(
            r#"<li class="slide"><div class="list_text">
                <div class="content_title"><a href="/news/10{i}/story-{i}/">Title {i}</a></div>
                <div class="article_teaser_body"> Summary {i} </div>
            </div></li>"#
        ));
    }
    html.push_str("</ul></body></html>");
    html
}

const HEMISPHERES: [&str; 4] = [
    "Cerberus",
    "Schiaparelli",
    "Syrtis Major",
    "Valles Marineris",
];

fn hemisphere_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Add search results listing the first `count` hemispheres, plus their detail pages.
pub fn with_hemispheres(mut source: MemorySource, count: usize) -> MemorySource {
    let mut results = String::from("<html><body><div class=\"collapsible results\">");
    for name in HEMISPHERES.iter().take(count) {
        let slug = hemisphere_slug(name);
        results.push_str(&format!(
            r#"<div class="item">
                <a href="/search/map/Mars/Viking/{slug}_enhanced" class="itemLink product-item"><img src="{slug}.png"></a>
                <div class="description">
                    <a href="/search/map/Mars/Viking/{slug}_enhanced" class="itemLink product-item"><h3>{name} Hemisphere Enhanced</h3></a>
                </div>
            </div>"#
        ));
    }
    results.push_str("</div></body></html>");

    source = source.with_page(HEMI_URL, results);
    for name in HEMISPHERES.iter().take(count) {
        let slug = hemisphere_slug(name);
        source = source.with_page(
            format!("https://hemi.test/search/map/Mars/Viking/{slug}_enhanced"),
            format!(
                r#"<html><body>
                <div class="downloads"><ul>
                    <li><a href="/cache/images/{slug}_enhanced.tif_full.jpg">Sample</a></li>
                    <li><a href="/cache/images/{slug}_enhanced.tif">Original</a></li>
                </ul></div>
                <section class="block metadata"><h2 class="title">{name} Hemisphere Enhanced</h2></section>
                </body></html>"#
            ),
        );
    }
    source
}

pub fn hemisphere_names() -> Vec<&'static str> {
    HEMISPHERES.to_vec()
}

/// Add the image gallery; `featured` and `latest` control which paths exist.
pub fn with_images(source: MemorySource, featured: bool, latest: bool) -> MemorySource {
    let mut gallery = String::from("<html><body>");
    if featured {
        gallery.push_str(
            r#"<a id="full_image" class="button fancybox" href="/slideshow/PIA1">FULL IMAGE</a>"#,
        );
    }
    if latest {
        gallery.push_str(
            r#"<section class="search-results"><a class="group" href="/images/pia2-latest">Latest</a></section>"#,
        );
    }
    gallery.push_str("</body></html>");

    source
        .with_page(IMAGES_URL, gallery)
        .with_page(
            "https://jpl.test/slideshow/PIA1",
            r#"<div class="buttons"><a class="button" href="/details/PIA1">more info</a></div>"#,
        )
        .with_page(
            "https://jpl.test/details/PIA1",
            r#"<figure class="lede"><a href="/spaceimages/images/largesize/PIA1_hires.jpg"><img src="/spaceimages/images/largesize/PIA1_hires.jpg"></a></figure>"#,
        )
        .with_page(
            "https://jpl.test/images/pia2-latest",
            r#"<img class="BaseImage object-contain" src="https://cdn.jpl.test/PIA2.jpg">"#,
        )
}

/// Every Mars page in one source.
pub fn mars_source(news_count: usize, hemispheres: usize, featured: bool) -> MemorySource {
    let source = MemorySource::new().with_page(NEWS_URL, news_page(news_count));
    with_images(with_hemispheres(source, hemispheres), featured, true)
}

pub fn browser(source: MemorySource) -> StaticBrowser<MemorySource> {
    StaticBrowser::new(source)
}
