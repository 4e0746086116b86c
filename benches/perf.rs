use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use vct_analyst::dataset::read_player_data;
use vct_analyst::impact::ImpactScorer;
use vct_analyst::player::{PlayerRecord, PlayerStats, Role};
use vct_analyst::query::{OfflineAssistant, QueryRouter};
use vct_analyst::roster::{Metric, RosterTable};

fn sample_stats(idx: usize) -> PlayerStats {
    let f = idx as f64;
    PlayerStats {
        kd_ratio: 0.6 + (f % 13.0) * 0.07,
        acs: 140.0 + (f % 29.0) * 5.0,
        mvps: f % 14.0,
        first_kills: f % 22.0,
        aces: f % 6.0,
        clutches: f % 12.0,
        headshot_pct: 15.0 + (f % 20.0),
    }
}

fn sample_roster(n: usize) -> RosterTable {
    let players = (0..n)
        .map(|idx| {
            PlayerRecord::new(
                format!("Player {}", idx + 1),
                format!("Team {}", idx % 16),
                Role::ALL[idx % Role::ALL.len()],
                sample_stats(idx),
            )
        })
        .collect();
    RosterTable::new(players)
}

fn sample_csv(n: usize) -> String {
    let mut out = String::from(
        "Name,Team,Role,K/D Ratio,ACS,Match MVP(s),First Kills,Aces,Clutches,Headshot Percentage\n",
    );
    for idx in 0..n {
        let s = sample_stats(idx);
        out.push_str(&format!(
            "Player {},Team {},{},{},{},{},{},{},{},{}\n",
            idx + 1,
            idx % 16,
            Role::ALL[idx % 4],
            s.kd_ratio,
            s.acs,
            s.mvps,
            s.first_kills,
            s.aces,
            s.clutches,
            s.headshot_pct
        ));
    }
    out
}

fn bench_impact_score(c: &mut Criterion) {
    let stats: Vec<PlayerStats> = (0..1_000).map(sample_stats).collect();
    c.bench_function("impact_score_1k", |b| {
        b.iter(|| {
            let total: f64 = stats.iter().map(ImpactScorer::score).sum();
            black_box(total);
        })
    });
}

fn bench_roster_queries(c: &mut Criterion) {
    let roster = sample_roster(5_000);
    c.bench_function("top_players_acs", |b| {
        b.iter(|| black_box(roster.top_players(black_box(Metric::Acs), 5)))
    });
    c.bench_function("team_composition", |b| {
        b.iter(|| black_box(roster.suggest_team_composition()))
    });
    let router = QueryRouter::default();
    c.bench_function("route_and_respond", |b| {
        b.iter(|| {
            let text = router
                .respond(black_box("top kd players"), &roster, &OfflineAssistant)
                .unwrap();
            black_box(text.len());
        })
    });
}

fn bench_csv_load(c: &mut Criterion) {
    let csv = sample_csv(2_000);
    c.bench_function("csv_load_2k", |b| {
        b.iter(|| {
            let players = read_player_data(black_box(csv.as_bytes())).unwrap();
            black_box(players.len());
        })
    });
}

criterion_group!(benches, bench_impact_score, bench_roster_queries, bench_csv_load);
criterion_main!(benches);
