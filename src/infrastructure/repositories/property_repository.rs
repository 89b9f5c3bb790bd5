//! SeaORM implementation of PropertyRepository
//!
//! Listing rows are fetched with a fixed projection. The representative image
//! and the viewer's favorite flag are correlated subqueries inside the same
//! SELECT, so a page of N rows costs one round trip.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr, Order, Query, SimpleExpr, SubQueryStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use crate::domain::{
    AddressSuggestion, CitySuggestion, DomainError, IdFilter, ListingQuery, OrderField,
    PropertyChanges, PropertyDetail, PropertyDraft, PropertyImage, PropertyRepository,
    PropertySummary, SearchQuery, SearchSuggestions, StreetSuggestion,
};
use crate::models::favorite::{Column as FavoriteColumn, Entity as FavoriteEntity};
use crate::models::property::{ActiveModel, Column, Entity as PropertyEntity, Model};
use crate::models::property_image::{
    self, Column as ImageColumn, Entity as ImageEntity, Model as ImageModel,
};

/// SeaORM-based implementation of PropertyRepository
pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn images_for(&self, property_id: i32) -> Result<Vec<ImageModel>, DomainError> {
        let images = ImageEntity::find()
            .filter(ImageColumn::PropertyId.eq(property_id))
            .order_by_desc(ImageColumn::IsPrimary)
            .order_by_asc(ImageColumn::Id)
            .all(&self.db)
            .await?;
        Ok(images)
    }

    async fn detail(&self, model: Model) -> Result<PropertyDetail, DomainError> {
        let images = self.images_for(model.id).await?;
        Ok(to_detail(model, images))
    }
}

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    id: i32,
    property_type: String,
    created_at: String,
    price: f64,
    price_currency: String,
    total_rooms: Option<f64>,
    area: f64,
    energy_class: Option<String>,
    street_name: String,
    street_number: Option<String>,
    postal_code: String,
    city: String,
    thumbnail: Option<String>,
    favorite: bool,
}

impl From<SummaryRow> for PropertySummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            property_type: row.property_type,
            created_at: row.created_at,
            price: row.price,
            price_currency: row.price_currency,
            total_rooms: row.total_rooms,
            area: row.area,
            energy_class: row.energy_class,
            street_name: row.street_name,
            street_number: row.street_number,
            postal_code: row.postal_code,
            city: row.city,
            thumbnail: row.thumbnail,
            favorite: row.favorite,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CityRow {
    city: String,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct StreetRow {
    street_name: String,
    postal_code: String,
    city: String,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct AddressRow {
    street_name: String,
    street_number: Option<String>,
    postal_code: String,
    city: String,
}

#[derive(Debug, FromQueryResult)]
struct CityNameRow {
    city: String,
}

/// `SELECT image FROM property_images WHERE property_id = properties.id
/// ORDER BY is_primary DESC, id ASC LIMIT 1`
fn thumbnail_expr() -> SimpleExpr {
    SimpleExpr::SubQuery(
        None,
        Box::new(SubQueryStatement::SelectStatement(
            Query::select()
                .column((ImageEntity, ImageColumn::Image))
                .from(ImageEntity)
                .and_where(
                    Expr::col((ImageEntity, ImageColumn::PropertyId))
                        .equals((PropertyEntity, Column::Id)),
                )
                .order_by((ImageEntity, ImageColumn::IsPrimary), Order::Desc)
                .order_by((ImageEntity, ImageColumn::Id), Order::Asc)
                .limit(1)
                .to_owned(),
        )),
    )
}

/// `EXISTS(favorite for (viewer, properties.id))`, or constant false for anonymous viewers.
fn favorite_expr(viewer_id: Option<i32>) -> SimpleExpr {
    match viewer_id {
        Some(user_id) => Expr::exists(
            Query::select()
                .expr(Expr::val(1))
                .from(FavoriteEntity)
                .and_where(
                    Expr::col((FavoriteEntity, FavoriteColumn::PropertyId))
                        .equals((PropertyEntity, Column::Id)),
                )
                .and_where(Expr::col((FavoriteEntity, FavoriteColumn::UserId)).eq(user_id))
                .to_owned(),
        ),
        None => Expr::val(false).into(),
    }
}

/// The summary projection shared by every listing-shaped read.
fn summary_select(viewer_id: Option<i32>) -> Select<PropertyEntity> {
    PropertyEntity::find()
        .select_only()
        .columns([
            Column::Id,
            Column::PropertyType,
            Column::CreatedAt,
            Column::Price,
            Column::PriceCurrency,
            Column::TotalRooms,
            Column::Area,
            Column::EnergyClass,
            Column::StreetName,
            Column::StreetNumber,
            Column::PostalCode,
            Column::City,
        ])
        .column_as(thumbnail_expr(), "thumbnail")
        .column_as(favorite_expr(viewer_id), "favorite")
}

/// `pattern` must already be lower-cased; `column` is one of the `*_lc` columns.
fn icontains(column: Column, pattern: &str) -> SimpleExpr {
    Expr::col((PropertyEntity, column)).like(LikeExpr::new(pattern).escape('\\'))
}

/// Filter shared by `list` and `count`.
fn listing_condition(query: &ListingQuery) -> Condition {
    let mut condition = Condition::all()
        .add(Column::CountryCode.eq(query.country_code.as_str()))
        .add(Column::Status.is_in(query.statuses.iter().map(|s| s.as_str())));

    match &query.id_filter {
        Some(IdFilter::Ids(ids)) => condition = condition.add(Column::Id.is_in(ids.clone())),
        Some(IdFilter::PostalCodes(codes)) => {
            condition = condition.add(Column::PostalCode.is_in(codes.clone()))
        }
        Some(IdFilter::Cities(cities)) => {
            condition = condition.add(Column::City.is_in(cities.clone()))
        }
        None => {}
    }

    if let Some(city) = &query.city {
        condition = condition.add(Column::CityLc.eq(city.to_lowercase()));
    }
    if !query.property_types.is_empty() {
        condition = condition
            .add(Column::PropertyType.is_in(query.property_types.iter().map(|t| t.as_str())));
    }
    if let Some(min) = query.min_price {
        condition = condition.add(Column::Price.gte(min));
    }
    if let Some(max) = query.max_price {
        condition = condition.add(Column::Price.lte(max));
    }
    if let Some(min) = query.min_area {
        condition = condition.add(Column::Area.gte(min));
    }
    if let Some(max) = query.max_area {
        condition = condition.add(Column::Area.lte(max));
    }
    if let Some(rooms) = query.total_rooms {
        condition = condition.add(Column::TotalRooms.eq(rooms));
    }

    condition
}

fn order_column(field: OrderField) -> Column {
    match field {
        OrderField::Id => Column::Id,
        OrderField::CreatedAt => Column::CreatedAt,
        OrderField::Price => Column::Price,
        OrderField::Area => Column::Area,
        OrderField::TotalRooms => Column::TotalRooms,
        OrderField::ConstructionYear => Column::ConstructionYear,
    }
}

/// Base filter of all three suggestion passes.
fn search_condition(query: &SearchQuery) -> Condition {
    let mut condition = Condition::all()
        .add(Column::CountryCode.eq(query.country_code.as_str()))
        .add(Column::Status.is_in(query.statuses.iter().map(|s| s.as_str())));
    if !query.property_types.is_empty() {
        condition = condition
            .add(Column::PropertyType.is_in(query.property_types.iter().map(|t| t.as_str())));
    }
    condition
}

fn capped<E: EntityTrait>(select: Select<E>, limit: Option<u64>) -> Select<E> {
    match limit {
        Some(limit) => select.limit(limit),
        None => select,
    }
}

fn to_image(model: ImageModel) -> PropertyImage {
    PropertyImage {
        id: model.id,
        title: model.title,
        description: model.description,
        is_primary: model.is_primary,
        image: model.image,
        created_at: model.created_at,
    }
}

fn to_detail(model: Model, images: Vec<ImageModel>) -> PropertyDetail {
    PropertyDetail {
        id: model.id,
        price: model.price,
        price_currency: model.price_currency,
        area: model.area,
        total_area: model.total_area,
        measured_area: model.measured_area,
        total_rooms: model.total_rooms,
        toilets: model.toilets,
        construction_year: model.construction_year,
        renovation_year: model.renovation_year,
        total_floors: model.total_floors,
        heating: model.heating,
        outer_walls: model.outer_walls,
        roof_type: model.roof_type,
        description: model.description,
        energy_class: model.energy_class,
        street_name: model.street_name,
        street_number: model.street_number,
        postal_code: model.postal_code,
        city: model.city,
        region: model.region,
        country_code: model.country_code,
        property_type: model.property_type,
        status: model.status,
        owner: model.owner_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        images: images.into_iter().map(to_image).collect(),
    }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn list(&self, query: &ListingQuery) -> Result<Vec<PropertySummary>, DomainError> {
        let mut select = summary_select(query.viewer_id).filter(listing_condition(query));

        for term in &query.ordering {
            let order = if term.descending {
                Order::Desc
            } else {
                Order::Asc
            };
            select = select.order_by(order_column(term.field), order);
        }
        if !query.ordering.iter().any(|t| t.field == OrderField::Id) {
            select = select.order_by_desc(Column::Id);
        }

        if let Some(limit) = query.limit {
            select = select
                .limit(limit)
                .offset(query.offset().unwrap_or_default());
        }

        let rows = select.into_model::<SummaryRow>().all(&self.db).await?;
        Ok(rows.into_iter().map(PropertySummary::from).collect())
    }

    async fn count(&self, query: &ListingQuery) -> Result<u64, DomainError> {
        let count = PropertyEntity::find()
            .filter(listing_condition(query))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn summaries_by_ids(
        &self,
        ids: &[i32],
        viewer_id: Option<i32>,
    ) -> Result<Vec<PropertySummary>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = summary_select(viewer_id)
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Id)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(PropertySummary::from).collect())
    }

    async fn quick_search(&self, query: &SearchQuery) -> Result<SearchSuggestions, DomainError> {
        let pattern = query.like_pattern();
        let row_count = || Expr::col((PropertyEntity, Column::Id)).count();

        let cities = capped(
            PropertyEntity::find()
                .select_only()
                .column(Column::City)
                .column_as(row_count(), "count")
                .filter(search_condition(query))
                .filter(icontains(Column::CityLc, &pattern))
                .group_by(Column::City)
                .order_by_desc(row_count())
                .order_by_asc(Column::City),
            query.limit,
        )
        .into_model::<CityRow>()
        .all(&self.db)
        .await?;

        let streets = capped(
            PropertyEntity::find()
                .select_only()
                .columns([Column::StreetName, Column::PostalCode, Column::City])
                .column_as(row_count(), "count")
                .filter(search_condition(query))
                .filter(icontains(Column::StreetNameLc, &pattern))
                .group_by(Column::StreetName)
                .group_by(Column::PostalCode)
                .group_by(Column::City)
                .order_by_desc(row_count())
                .order_by_asc(Column::StreetName),
            query.limit,
        )
        .into_model::<StreetRow>()
        .all(&self.db)
        .await?;

        let addresses = capped(
            PropertyEntity::find()
                .select_only()
                .columns([
                    Column::StreetName,
                    Column::StreetNumber,
                    Column::PostalCode,
                    Column::City,
                ])
                .filter(search_condition(query))
                .filter(
                    Condition::any()
                        .add(icontains(Column::StreetNameLc, &pattern))
                        .add(icontains(Column::PostalCodeLc, &pattern)),
                )
                .order_by_asc(Column::Id),
            query.limit,
        )
        .into_model::<AddressRow>()
        .all(&self.db)
        .await?;

        Ok(SearchSuggestions {
            cities: cities
                .into_iter()
                .map(|r| CitySuggestion {
                    city: r.city,
                    count: r.count,
                })
                .collect(),
            streets: streets
                .into_iter()
                .map(|r| StreetSuggestion {
                    street_name: r.street_name,
                    postal_code: r.postal_code,
                    city: r.city,
                    count: r.count,
                })
                .collect(),
            addresses: addresses
                .into_iter()
                .map(|r| AddressSuggestion {
                    street_name: r.street_name,
                    street_number: r.street_number,
                    postal_code: r.postal_code,
                    city: r.city,
                })
                .collect(),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PropertyDetail>, DomainError> {
        match PropertyEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.detail(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        owner_id: i32,
        draft: PropertyDraft,
    ) -> Result<PropertyDetail, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let PropertyDraft {
            property,
            country_code,
            property_type,
            status,
        } = draft;

        let txn = self.db.begin().await?;

        let new_property = ActiveModel {
            price: Set(property.price),
            price_currency: Set(property.price_currency.trim().to_string()),
            area: Set(property.area),
            total_area: Set(property.total_area),
            measured_area: Set(property.measured_area),
            total_rooms: Set(property.total_rooms),
            toilets: Set(property.toilets),
            construction_year: Set(property.construction_year),
            renovation_year: Set(property.renovation_year),
            total_floors: Set(property.total_floors),
            heating: Set(property.heating),
            outer_walls: Set(property.outer_walls),
            roof_type: Set(property.roof_type),
            description: Set(property.description),
            energy_class: Set(property.energy_class),
            street_name: Set(property.street_name.trim().to_string()),
            street_number: Set(property.street_number),
            postal_code: Set(property.postal_code.trim().to_string()),
            city: Set(property.city.trim().to_string()),
            region: Set(property.region),
            country_code: Set(country_code),
            property_type: Set(property_type.as_str().to_string()),
            status: Set(status.as_str().to_string()),
            owner_id: Set(Some(owner_id)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let saved = new_property.insert(&txn).await?;

        if !property.images.is_empty() {
            let images = property
                .images
                .into_iter()
                .map(|image| property_image::ActiveModel {
                    property_id: Set(saved.id),
                    title: Set(image.title),
                    description: Set(image.description),
                    is_primary: Set(image.is_primary),
                    image: Set(image.image),
                    created_at: Set(now.clone()),
                    updated_at: Set(now.clone()),
                    ..Default::default()
                });
            ImageEntity::insert_many(images).exec(&txn).await?;
        }

        txn.commit().await?;

        self.detail(saved).await
    }

    async fn update(
        &self,
        id: i32,
        owner_id: i32,
        changes: PropertyChanges,
    ) -> Result<PropertyDetail, DomainError> {
        let existing = PropertyEntity::find_by_id(id)
            .filter(Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(currency) = changes.price_currency {
            active.price_currency = Set(currency);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&self.db).await?;
        self.detail(updated).await
    }

    async fn cities(&self) -> Result<Vec<String>, DomainError> {
        let rows = PropertyEntity::find()
            .select_only()
            .column(Column::City)
            .distinct()
            .order_by_asc(Column::City)
            .into_model::<CityNameRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|r| r.city).collect())
    }
}
