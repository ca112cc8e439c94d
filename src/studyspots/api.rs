//! # API Facade
//!
//! [`SpotsApi`] is the page controller: the single entry point a UI client
//! talks to. It owns the loaded catalog and the current pipeline
//! (view → filter → paginator) and hands back plain data ([`PageView`],
//! [`MallCard`]) for the client to render.
//!
//! ## Render Cycle
//!
//! 1. [`SpotsApi::load`] fetches the catalog from the [`DataSource`].
//! 2. The client builds one [`FilterState`] from its controls and calls
//!    [`SpotsApi::browse`] with the [`View`] it is showing.
//! 3. The API filters the view's base set, paginates it with the stored page
//!    size, and returns the current page as cards annotated with favorite
//!    membership.
//! 4. Navigation ([`SpotsApi::next_page`] and friends) moves within the same
//!    pipeline.
//!
//! `browse` only rebuilds the paginator when something it depends on changed
//! (view, filter state, catalog, or, for the favorites view, the favorite set),
//! so re-rendering with the same controls keeps the user on their page, while
//! any change starts again from page 1.
//!
//! ## Stale Loads
//!
//! Loads are tagged with a [`LoadTicket`]. Only the most recently issued
//! ticket may install its catalog; results from older tickets are discarded,
//! so when loads overlap the last one requested is the one that wins.
//!
//! ## Generic Over Storage and Source
//!
//! `SpotsApi<S: StorageBackend, D: DataSource>`:
//! - Production: `SpotsApi<FsBackend, DirSource>`
//! - Testing: `SpotsApi<MemBackend, StaticSource>`

use crate::catalog::{mall_index, spots_in_mall, DataSource};
use crate::error::{Result, SpotsError};
use crate::favorites::FavoritesSet;
use crate::filter::{apply_filters, distinct_areas, FilterState};
use crate::model::{ItemId, Listing, Mall, Spot};
use crate::paginate::{PageInfo, Paginator};
use crate::prefs::{PreferenceStore, ViewPreferences};
use crate::store::StorageBackend;
use serde::Serialize;

/// Which base set of spots is being browsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    AllSpots,
    Favorites,
    Mall(ItemId),
}

/// Everything a renderer needs to draw one spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: ItemId,
    pub name: String,
    pub area: String,
    pub mall_name: Option<String>,
    pub category: Option<String>,
    pub noise: Option<String>,
    pub charging: Option<String>,
    pub wifi: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MallCard {
    pub id: ItemId,
    pub name: String,
    pub area: String,
    pub description: String,
    pub image: Option<String>,
    pub spot_count: usize,
}

/// One rendered page of the current pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub cards: Vec<Card>,
    pub page: PageInfo,
    pub columns: u8,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub spots: Vec<Spot>,
    pub malls: Vec<Mall>,
}

impl Catalog {
    pub fn load<D: DataSource>(source: &D) -> Result<Self> {
        Ok(Self {
            spots: source.load_spots()?,
            malls: source.load_malls()?,
        })
    }

    /// Loads spots strictly and malls if they can be read. A malls failure is
    /// logged and leaves the mall list empty, so spot cards carry no mall name.
    pub fn load_spots_first<D: DataSource>(source: &D) -> Result<Self> {
        let spots = source.load_spots()?;
        let malls = source.load_malls().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "continuing without mall data");
            Vec::new()
        });
        Ok(Self { spots, malls })
    }
}

/// Proof that a load was requested; see [`SpotsApi::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

struct Pipeline {
    view: View,
    state: FilterState,
    catalog_generation: u64,
    favorites: Option<Vec<ItemId>>,
    paginator: Paginator<Spot>,
}

pub struct SpotsApi<S: StorageBackend, D: DataSource> {
    backend: S,
    source: D,
    catalog: Option<Catalog>,
    catalog_generation: u64,
    issued_loads: u64,
    pipeline: Option<Pipeline>,
}

impl<S: StorageBackend, D: DataSource> SpotsApi<S, D> {
    pub fn new(backend: S, source: D) -> Self {
        Self {
            backend,
            source,
            catalog: None,
            catalog_generation: 0,
            issued_loads: 0,
            pipeline: None,
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    // --- Loading ---

    /// Loads the catalog from the data source. Failures propagate and leave
    /// the previously loaded catalog (if any) in place.
    pub fn load(&mut self) -> Result<()> {
        let ticket = self.begin_load();
        let catalog = Catalog::load(&self.source)?;
        self.finish_load(ticket, catalog);
        Ok(())
    }

    /// Like [`SpotsApi::load`], but only spot data is required. Use it for
    /// views that show spots; mall views need [`SpotsApi::load`].
    pub fn load_spots_first(&mut self) -> Result<()> {
        let ticket = self.begin_load();
        let catalog = Catalog::load_spots_first(&self.source)?;
        self.finish_load(ticket, catalog);
        Ok(())
    }

    /// Issues a ticket for a new load, invalidating all earlier tickets.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_loads += 1;
        LoadTicket {
            generation: self.issued_loads,
        }
    }

    /// Installs `catalog` if `ticket` is still the latest one issued.
    /// Returns whether the catalog was installed.
    pub fn finish_load(&mut self, ticket: LoadTicket, catalog: Catalog) -> bool {
        if ticket.generation != self.issued_loads {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.issued_loads,
                "discarding stale catalog load"
            );
            return false;
        }
        self.catalog = Some(catalog);
        self.catalog_generation += 1;
        true
    }

    pub fn catalog(&self) -> Result<&Catalog> {
        self.catalog
            .as_ref()
            .ok_or_else(|| SpotsError::Api("Catalog has not been loaded".to_string()))
    }

    // --- Browsing ---

    /// Filters and paginates `view` with `state`, returning the current page.
    pub fn browse(&mut self, view: View, state: FilterState) -> Result<PageView> {
        let favorites = match view {
            View::Favorites => Some(self.favorites().ids()),
            _ => None,
        };

        let unchanged = self.pipeline.as_ref().is_some_and(|p| {
            p.view == view
                && p.state == state
                && p.catalog_generation == self.catalog_generation
                && p.favorites == favorites
        });

        if !unchanged {
            let base = self.base_spots(&view)?;
            let filtered = apply_filters(&base, &state);
            let per_page = self.preferences().items_per_page;
            tracing::debug!(
                ?view,
                matched = filtered.len(),
                of = base.len(),
                per_page,
                "rebuilding pagination"
            );
            self.pipeline = Some(Pipeline {
                view,
                state,
                catalog_generation: self.catalog_generation,
                favorites,
                paginator: Paginator::new(filtered, per_page),
            });
        }

        self.current_page()
    }

    /// The current page of the active pipeline.
    pub fn current_page(&self) -> Result<PageView> {
        let pipeline = self.pipeline()?;
        let catalog = self.catalog()?;
        let malls = mall_index(&catalog.malls);
        let favorites = self.favorites().ids();

        let cards = pipeline
            .paginator
            .current_page_items()
            .iter()
            .map(|spot| Card {
                id: spot.id.clone(),
                name: spot.name.clone(),
                area: spot.area.clone(),
                mall_name: spot
                    .mall_id
                    .as_ref()
                    .and_then(|id| malls.get(id))
                    .map(|m| m.name.clone()),
                category: spot.category.clone(),
                noise: spot.noise_level.map(|n| n.label().to_string()),
                charging: spot.charging_ports.map(|c| c.label().to_string()),
                wifi: spot.wifi.map(|w| w.label().to_string()),
                description: spot.description().to_string(),
                image: spot.image.clone(),
                is_favorite: favorites.contains(&spot.id),
            })
            .collect();

        Ok(PageView {
            cards,
            page: pipeline.paginator.page_info(),
            columns: self.preferences().columns,
        })
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<PageView> {
        self.pipeline_mut()?.paginator.go_to_page(page);
        self.current_page()
    }

    pub fn next_page(&mut self) -> Result<PageView> {
        self.pipeline_mut()?.paginator.next_page();
        self.current_page()
    }

    pub fn prev_page(&mut self) -> Result<PageView> {
        self.pipeline_mut()?.paginator.prev_page();
        self.current_page()
    }

    /// Sorted distinct areas of all spots, for the area filter options.
    pub fn areas(&self) -> Result<Vec<String>> {
        Ok(distinct_areas(&self.catalog()?.spots))
    }

    pub fn mall_areas(&self) -> Result<Vec<String>> {
        Ok(distinct_areas(&self.catalog()?.malls))
    }

    // --- Malls ---

    pub fn malls(&self, state: &FilterState) -> Result<Vec<MallCard>> {
        let catalog = self.catalog()?;
        Ok(apply_filters(&catalog.malls, state)
            .into_iter()
            .map(|mall| MallCard {
                spot_count: spots_in_mall(&catalog.spots, &mall.id).len(),
                description: mall.description().to_string(),
                id: mall.id,
                name: mall.name,
                area: mall.area,
                image: mall.image,
            })
            .collect())
    }

    pub fn mall(&self, id: &ItemId) -> Result<Mall> {
        self.catalog()?
            .malls
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| SpotsError::MallNotFound(id.clone()))
    }

    // --- Preferences ---

    pub fn preferences(&self) -> ViewPreferences {
        PreferenceStore::new(&self.backend).get()
    }

    pub fn set_columns(&mut self, columns: i64) -> ViewPreferences {
        let current = self.preferences();
        let prefs = ViewPreferences::clamped(columns, current.items_per_page as i64);
        PreferenceStore::new(&self.backend).set(prefs);
        prefs
    }

    /// Stores a new page size and re-paginates the active pipeline from page 1.
    pub fn set_items_per_page(&mut self, items_per_page: i64) -> ViewPreferences {
        let current = self.preferences();
        let prefs = ViewPreferences::clamped(current.columns as i64, items_per_page);
        PreferenceStore::new(&self.backend).set(prefs);
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.paginator.set_items_per_page(prefs.items_per_page);
        }
        prefs
    }

    // --- Favorites ---

    pub fn is_favorite(&self, id: &ItemId) -> bool {
        self.favorites().is_favorite(id)
    }

    pub fn toggle_favorite(&mut self, id: &ItemId) -> bool {
        self.favorites().toggle(id)
    }

    fn favorites(&self) -> FavoritesSet<&S> {
        FavoritesSet::new(&self.backend)
    }

    fn base_spots(&self, view: &View) -> Result<Vec<Spot>> {
        let catalog = self.catalog()?;
        match view {
            View::AllSpots => Ok(catalog.spots.clone()),
            View::Favorites => Ok(self.favorites().favorites_of(&catalog.spots)),
            View::Mall(id) => {
                self.mall(id)?;
                Ok(spots_in_mall(&catalog.spots, id))
            }
        }
    }

    fn pipeline(&self) -> Result<&Pipeline> {
        self.pipeline
            .as_ref()
            .ok_or_else(|| SpotsError::Api("Nothing is being browsed yet".to_string()))
    }

    fn pipeline_mut(&mut self) -> Result<&mut Pipeline> {
        self.pipeline
            .as_mut()
            .ok_or_else(|| SpotsError::Api("Nothing is being browsed yet".to_string()))
    }
}
