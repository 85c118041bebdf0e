use crate::view::{DetailView, MonthRow, SummaryCard};

use super::{PageContext, PortfolioSection};

pub const LOAD_ERROR_MESSAGE: &str = "Error loading portfolio data.";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page_open(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body class=\"bg-slate-950 text-slate-200\">\n",
        escape(title)
    )
}

fn page_close(ctx: &PageContext<'_>) -> String {
    format!(
        "<footer class=\"py-8 text-center text-slate-500 text-sm\">Generated {}</footer>\n</body>\n</html>\n",
        ctx.generated_at.format("%e %b %Y %H:%M UTC").to_string().trim()
    )
}

fn bottom_nav(active: &str) -> String {
    let mut html = String::from("<nav class=\"bottom-nav\">");
    for (id, label) in [("portfolio", "Portfolio"), ("disclosures", "Disclosures")] {
        let class = if id == active { " class=\"active\"" } else { "" };
        html.push_str(&format!("<a href=\"#{}\"{}>{}</a>", id, class, label));
    }
    html.push_str("</nav>\n");
    html
}

// ─── Index (summary cards) ───

pub fn render_index(ctx: &PageContext<'_>, section: &PortfolioSection) -> String {
    let mut html = page_open(&ctx.config.site_title);
    html.push_str(&format!(
        "<header class=\"py-12 text-center\"><h1 class=\"text-4xl font-bold text-white\">{}</h1></header>\n",
        escape(&ctx.config.site_title)
    ));
    html.push_str("<main>\n<section id=\"portfolio\" class=\"px-6\">\n");
    html.push_str("<h2 class=\"text-3xl font-bold text-white mb-8\">Strategies</h2>\n");
    html.push_str("<div id=\"portfolio-container\" class=\"grid md:grid-cols-3 gap-8\">\n");

    match section {
        PortfolioSection::Failed(reason) => {
            html.push_str(&format!(
                "<div class=\"col-span-3 text-center py-12\"><p class=\"text-slate-400\">{}</p>\
                 <p class=\"text-slate-600 text-xs mt-2\">{}</p></div>\n",
                LOAD_ERROR_MESSAGE,
                escape(reason)
            ));
            html.push_str("</div>\n");
        }
        PortfolioSection::Cards { cards, next_page } => {
            for card in cards {
                html.push_str(&card_html(ctx, card));
            }
            html.push_str("</div>\n");
            if let Some(href) = next_page {
                html.push_str(&format!(
                    "<div class=\"text-center mt-12\"><a id=\"load-more\" href=\"{}\" \
                     class=\"px-8 py-3 rounded-lg bg-tortoise-accent text-white\">Load More Strategies</a></div>\n",
                    escape(href)
                ));
            }
        }
    }

    html.push_str("</section>\n");
    html.push_str(
        "<section id=\"disclosures\" class=\"px-6 py-12 text-slate-500 text-sm\">\
         Past performance is not indicative of future results.</section>\n</main>\n",
    );
    html.push_str(&bottom_nav("portfolio"));
    html.push_str(&page_close(ctx));
    html
}

fn card_html(ctx: &PageContext<'_>, card: &SummaryCard) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"portfolio-card group\" data-theme=\"{}\">\n<div class=\"card-gradient rounded-3xl p-8 h-full\">\n",
        card.theme.key()
    ));
    html.push_str(&format!(
        "<h3 class=\"text-2xl font-bold text-white mb-2\">{}</h3>\n\
         <span class=\"inline-block px-3 py-1 {} {} rounded-full text-xs font-medium\">{}</span>\n",
        escape(&card.name),
        card.theme.badge_bg_class(),
        card.theme.badge_text_class(),
        escape(&card.category),
    ));
    html.push_str(&format!("<p class=\"text-slate-400 mb-8\">{}</p>\n", escape(&card.description)));

    html.push_str("<div class=\"mb-8\"><h4 class=\"text-white font-medium mb-4\">Calendar Year Performance</h4>\n");
    html.push_str("<div class=\"space-y-3\">\n");
    for row in &card.rows {
        html.push_str(&format!(
            "<div class=\"flex justify-between items-center\"><span class=\"text-slate-300\">{}</span>\
             <div class=\"text-right\"><span class=\"text-white font-semibold\">{}</span>\
             <span class=\"text-slate-400 text-sm ml-2\">({}: {})</span></div></div>\n",
            escape(&row.label),
            escape(&row.ytd),
            escape(&card.benchmark_name),
            escape(&row.benchmark_ytd),
        ));
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"pt-6 border-t border-slate-800\"><div class=\"flex space-x-3\">\n");
    html.push_str(&format!(
        "<a class=\"flex-1 view-details-btn px-4 py-3 rounded-lg text-sm font-medium\" \
         data-strategy-id=\"{}\" href=\"{}\">View Monthly Details</a>\n",
        escape(&card.id),
        escape(&ctx.links.detail_href(&card.id, card.rows.first().map(|r| r.year))),
    ));
    if let Some(file) = &card.holdings_file {
        html.push_str(&format!(
            "<a class=\"download-btn px-4 py-3 rounded-lg text-sm font-medium\" href=\"{}\" download>\
             Holdings <br> ({})</a>\n",
            escape(&ctx.config.holdings_href(file)),
            escape(&ctx.config.holdings_label),
        ));
    }
    html.push_str("</div></div>\n</div>\n</div>\n");
    html
}

// ─── Detail (modal content as its own page) ───

pub fn render_detail(ctx: &PageContext<'_>, detail: &DetailView) -> String {
    let mut html = page_open(&detail.title);
    html.push_str("<main id=\"performanceModal\" class=\"px-6 py-12\">\n");
    html.push_str(&format!(
        "<a class=\"text-slate-400\" href=\"index.html\">&larr; All strategies</a>\n\
         <h2 id=\"modalStrategyName\" class=\"text-2xl font-bold text-white my-6\">{}</h2>\n",
        escape(&detail.title)
    ));

    html.push_str("<div id=\"yearTabs\" class=\"flex space-x-2 mb-6\">\n");
    for tab in &detail.tabs {
        let class = if tab.active {
            "year-tab active bg-tortoise-accent text-white"
        } else {
            "year-tab bg-slate-800 text-slate-300"
        };
        html.push_str(&format!(
            "<a class=\"{} px-4 py-2 rounded-lg text-sm font-medium\" data-year=\"{}\" href=\"{}\">{}</a>\n",
            class,
            tab.year,
            escape(&ctx.links.detail_href(&detail.strategy_id, Some(tab.year))),
            escape(&tab.label),
        ));
    }
    html.push_str("</div>\n");

    if let Some(cum) = &detail.cumulative {
        html.push_str(&format!(
            "<div id=\"cumulativeDisplay\" class=\"mb-6\"><span id=\"currentYearLabel\">{}</span> \
             <span id=\"cumulativeStrategy\" class=\"text-white font-semibold\">{}</span> \
             <span class=\"text-slate-400\">({}: <span id=\"cumulativeBenchmark\">{}</span>)</span></div>\n",
            escape(&cum.label),
            escape(&cum.ytd),
            escape(&detail.benchmark_name),
            escape(&cum.benchmark_ytd),
        ));
    }

    html.push_str(
        "<table class=\"w-full\"><thead><tr><th class=\"text-left\">Month</th>\
         <th>Return</th><th>Holdings</th></tr></thead>\n<tbody id=\"performanceTable\">\n",
    );
    if let Some(table) = &detail.table {
        for row in &table.rows {
            html.push_str(&month_row_html(row));
        }
    }
    html.push_str("</tbody></table>\n</main>\n");
    html.push_str(&page_close(ctx));
    html
}

fn month_row_html(row: &MonthRow) -> String {
    let color = if row.is_positive { "text-white" } else { "text-red-400" };
    let link = match &row.holdings_excel {
        Some(href) => format!(
            "<a href=\"{}\" download class=\"inline-flex items-center px-3 py-1.5 rounded-lg text-sm\">Excel</a>",
            escape(href)
        ),
        None => String::new(),
    };
    format!(
        "<tr class=\"border-b border-slate-800/50\"><td class=\"py-3 px-4 text-slate-300\">{}</td>\
         <td class=\"py-3 px-4 text-center font-medium {}\">{}</td>\
         <td class=\"py-3 px-4 text-center\">{}</td></tr>\n",
        escape(&row.month),
        color,
        escape(&row.ret),
        link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario: text containing every HTML-special character
    /// Expected: each one replaced by its entity
    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    /// Scenario: a negative and a positive month row
    /// Expected: red class for negative, white for non-negative; excel link only when present
    #[test]
    fn test_month_row_colors() {
        let neg = MonthRow {
            month: "Feb 25".into(),
            ret: "-2.1%".into(),
            is_positive: false,
            holdings_excel: Some("downloads/feb.xlsx".into()),
        };
        let html = month_row_html(&neg);
        assert!(html.contains("text-red-400"));
        assert!(html.contains("href=\"downloads/feb.xlsx\""));

        let pos = MonthRow { ret: "+0.0%".into(), is_positive: true, holdings_excel: None, ..neg };
        let html = month_row_html(&pos);
        assert!(html.contains("text-white"));
        assert!(!html.contains("Excel"));
    }
}
