//! Summary counts for the uploaded workbook.

use leptos::*;

use crate::Stats;

/// Label and value of each stat card, in display order.
pub fn stat_cards(stats: &Stats) -> [(&'static str, usize); 4] {
    [
        ("Total Studies", stats.total_studies),
        ("New Studies", stats.new_studies),
        ("Updated Studies", stats.updated_studies),
        ("Brands", stats.brand_count),
    ]
}

#[component]
pub fn StatsPanel(stats: Signal<Stats>) -> impl IntoView {
    view! {
        <div class="stats" id="stats">
            {move || {
                stat_cards(&stats.get())
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="stat">
                            <div class="stat-value">{value}</div>
                            <div class="stat-label">{label}</div>
                        </div>
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_cards_order() {
        let stats = Stats {
            total_studies: 12,
            new_studies: 3,
            updated_studies: 7,
            brand_count: 5,
        };
        let cards = stat_cards(&stats);
        assert_eq!(cards[0], ("Total Studies", 12));
        assert_eq!(cards[1], ("New Studies", 3));
        assert_eq!(cards[2], ("Updated Studies", 7));
        assert_eq!(cards[3], ("Brands", 5));
    }
}
