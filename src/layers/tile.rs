//! Base tile layer
//!
//! Fetches slippy-map tiles from a templated HTTP source on the shared
//! background runtime and hands decoded RGBA images back to the UI thread
//! over a channel. Decoded tiles live in an LRU cache.

use crate::{
    core::{
        geo::{LatLng, TileCoord},
        viewport::Viewport,
    },
    prelude::HashSet,
    runtime, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

const TILE_CACHE_CAPACITY: usize = 256;

/// A templated tile source in the `{s}/{z}/{x}/{y}` slippy-map scheme
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    url_template: String,
    subdomains: Vec<String>,
    attribution: String,
}

impl TileSource {
    pub fn new(
        url_template: impl Into<String>,
        subdomains: Vec<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            url_template: url_template.into(),
            subdomains,
            attribution: attribution.into(),
        }
    }

    /// The standard OpenStreetMap raster source
    pub fn osm() -> Self {
        Self::new(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            vec!["a".into(), "b".into(), "c".into()],
            "© OpenStreetMap contributors",
        )
    }

    /// Resolves the fetch URL for a tile, rotating subdomains deterministically
    pub fn url(&self, coord: &TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            &self.subdomains[(coord.x + coord.y) as usize % self.subdomains.len()]
        };

        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }
}

/// A decoded tile ready for upload to the UI
pub struct TileImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// The base tile layer: visible-tile computation, async loading, LRU cache
pub struct TileLayer {
    source: TileSource,
    cache: LruCache<TileCoord, Arc<TileImage>>,
    pending: HashSet<TileCoord>,
    results_tx: Sender<(TileCoord, Option<TileImage>)>,
    results_rx: Receiver<(TileCoord, Option<TileImage>)>,
    client: reqwest::Client,
    #[cfg(feature = "egui")]
    textures: crate::prelude::HashMap<TileCoord, egui::TextureHandle>,
}

impl TileLayer {
    pub fn new(source: TileSource) -> Self {
        let (results_tx, results_rx) = unbounded();
        Self {
            source,
            cache: LruCache::new(
                NonZeroUsize::new(TILE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            pending: HashSet::default(),
            results_tx,
            results_rx,
            client: reqwest::Client::new(),
            #[cfg(feature = "egui")]
            textures: crate::prelude::HashMap::default(),
        }
    }

    pub fn source(&self) -> &TileSource {
        &self.source
    }

    /// Tile coordinates covering the viewport at its (rounded) zoom level
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileCoord> {
        let z = viewport.zoom.round().clamp(0.0, 18.0) as u8;
        let bounds = viewport.bounds();

        let nw = TileCoord::from_lat_lng(
            &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
            z,
        );
        let se = TileCoord::from_lat_lng(
            &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
            z,
        );

        let max_coord = 2_u32.pow(z as u32).saturating_sub(1);
        let (x0, x1) = (nw.x.min(max_coord), se.x.min(max_coord));
        let (y0, y1) = (nw.y.min(max_coord), se.y.min(max_coord));

        let mut tiles = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                tiles.push(TileCoord::new(x, y, z));
            }
        }
        tiles
    }

    /// Kick off background fetches for visible tiles not yet cached or pending
    pub fn request_visible(&mut self, viewport: &Viewport) {
        for coord in self.visible_tiles(viewport) {
            if self.cache.contains(&coord) || self.pending.contains(&coord) {
                continue;
            }
            self.pending.insert(coord);

            let url = self.source.url(&coord);
            let client = self.client.clone();
            let tx = self.results_tx.clone();
            runtime::spawn(async move {
                match fetch_tile(client, &url).await {
                    Ok(image) => {
                        let _ = tx.send((coord, Some(image)));
                    }
                    Err(err) => {
                        log::warn!("tile fetch failed for {url}: {err}");
                        let _ = tx.send((coord, None));
                    }
                }
            });
        }
    }

    /// Drain completed fetches into the cache; returns how many tiles arrived
    pub fn pump(&mut self) -> usize {
        let mut arrived = 0;
        while let Ok((coord, image)) = self.results_rx.try_recv() {
            self.pending.remove(&coord);
            if let Some(image) = image {
                if let Some((evicted, _)) = self.cache.push(coord, Arc::new(image)) {
                    #[cfg(feature = "egui")]
                    self.textures.remove(&evicted);
                    #[cfg(not(feature = "egui"))]
                    let _ = evicted;
                }
                arrived += 1;
            }
        }
        arrived
    }

    /// A cached tile image, if loaded
    pub fn get(&mut self, coord: &TileCoord) -> Option<Arc<TileImage>> {
        self.cache.get(coord).cloned()
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// A GPU texture for a cached tile, uploading it on first use
    #[cfg(feature = "egui")]
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        coord: &TileCoord,
    ) -> Option<egui::TextureHandle> {
        if let Some(handle) = self.textures.get(coord) {
            return Some(handle.clone());
        }
        let image = self.cache.get(coord)?.clone();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width as usize, image.height as usize],
            &image.rgba,
        );
        let handle = ctx.load_texture(
            format!("tile_{}_{}_{}", coord.z, coord.x, coord.y),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.textures.insert(*coord, handle.clone());
        Some(handle)
    }
}

async fn fetch_tile(client: reqwest::Client, url: &str) -> Result<TileImage> {
    let bytes = client
        .get(url)
        .header(reqwest::header::USER_AGENT, "tapeline/0.1")
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let decoded = image::load_from_memory(&bytes)?.to_rgba8();
    Ok(TileImage {
        width: decoded.width(),
        height: decoded.height(),
        rgba: decoded.into_raw(),
    })
}
