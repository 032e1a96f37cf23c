//! The ten-room temple adventure: a real map with a first-visit collision
//! (treasure room and idol chamber share a grid offset).

use map_core::{
    Direction, Exploration, LayoutConfig, LayoutEngine, LayoutStore, MapView, Reveal, RoomGraph,
    StrategyKind,
};

fn temple() -> RoomGraph {
    let mut graph = RoomGraph::new();
    graph.connect_both("jungleClearing", Direction::North, "templeEntrance");
    graph.connect_both("templeEntrance", Direction::North, "hallOfStatues");
    graph.connect_both("hallOfStatues", Direction::East, "trapRoom");
    graph.connect_both("hallOfStatues", Direction::West, "altarRoom");
    graph.connect_both("trapRoom", Direction::North, "library");
    graph.connect_both("trapRoom", Direction::East, "undergroundTunnel");
    graph.connect_both("library", Direction::East, "treasureRoom");
    graph.connect_both("undergroundTunnel", Direction::North, "chamberOfIdol");
    graph.connect_both("chamberOfIdol", Direction::North, "exitPath");
    graph
}

fn engine(strategy: StrategyKind) -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::default().with_strategy(strategy)).unwrap()
}

#[test]
fn depth_grid_offsets_follow_first_visit() {
    let graph = temple();
    let visits = map_core::layout::traverse::depth_first(&graph, "jungleClearing").unwrap();
    let order: Vec<&str> = visits.iter().map(|v| v.room.as_str()).collect();
    assert_eq!(
        order,
        [
            "jungleClearing",
            "templeEntrance",
            "hallOfStatues",
            "trapRoom",
            "library",
            "treasureRoom",
            "undergroundTunnel",
            "chamberOfIdol",
            "exitPath",
            "altarRoom",
        ]
    );

    let offset = |id: &str| visits.iter().find(|v| v.room.as_str() == id).unwrap().offset;
    assert_eq!(offset("treasureRoom"), offset("chamberOfIdol"));
}

#[test]
fn depth_grid_separates_colliding_rooms() {
    let layout = engine(StrategyKind::DepthGrid)
        .layout(&temple(), "jungleClearing")
        .unwrap();

    assert_eq!(layout.len(), 10);
    let report = &layout.report().spacing;
    assert!(report.feasible);
    assert!(report.is_satisfied(), "{:?}", report.violations);
    assert!(report.adjustments >= 1);

    let treasure = layout.position("treasureRoom").unwrap();
    let idol = layout.position("chamberOfIdol").unwrap();
    assert!(treasure.distance(idol) >= report.min_distance - 1e-6);

    // Start at the bottom, exit path at the top.
    let start = layout.position("jungleClearing").unwrap();
    let exit = layout.position("exitPath").unwrap();
    assert!(exit.y < start.y);
    assert!(layout.position("altarRoom").unwrap().x < start.x);
}

#[test]
fn axis_grid_relocates_instead_of_overlapping() {
    let layout = engine(StrategyKind::AxisGrid)
        .layout(&temple(), "jungleClearing")
        .unwrap();

    assert_eq!(layout.len(), 10);
    assert!(layout.report().relocated >= 1);
    assert!(layout.report().spacing.is_satisfied());
}

#[test]
fn force_layout_keeps_every_room_on_the_canvas() {
    let layout = engine(StrategyKind::ForceDirected)
        .layout(&temple(), "jungleClearing")
        .unwrap();

    assert_eq!(layout.len(), 10);
    let bounds = LayoutConfig::default().bounds();
    for (_, point) in layout.iter() {
        assert!(bounds.contains(point));
    }
}

#[test]
fn store_and_view_track_the_player() {
    let graph = temple();
    let mut store = LayoutStore::new(engine(StrategyKind::DepthGrid));
    let mut exploration = Exploration::new(Reveal::Visited);

    for room in ["jungleClearing", "templeEntrance", "hallOfStatues"] {
        exploration.enter(room);
        let layout = store.refresh(&graph, "jungleClearing").unwrap();
        let view = MapView::build(&graph, layout, &exploration);
        assert_eq!(view.current().unwrap().id.as_str(), room);
    }

    assert_eq!(store.computations(), 1);
    let layout = store.current().unwrap();
    let view = MapView::build(&graph, layout, &exploration);
    assert_eq!(view.nodes.len(), 3);
    assert_eq!(view.edges.len(), 2);
    assert_eq!(view.node("hallOfStatues").unwrap().label, "Hall Of Statues");
}
