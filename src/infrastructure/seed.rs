use crate::infrastructure::auth::hash_password;
use crate::models::{property, property_image, user};
use sea_orm::*;

struct DemoListing {
    price: f64,
    area: f64,
    total_rooms: f64,
    street_name: &'static str,
    street_number: &'static str,
    postal_code: &'static str,
    city: &'static str,
    country_code: &'static str,
    property_type: &'static str,
    status: &'static str,
    images: &'static [(&'static str, bool)],
}

const DEMO_LISTINGS: &[DemoListing] = &[
    DemoListing {
        price: 50000.0,
        area: 110.0,
        total_rooms: 4.0,
        street_name: "Maršal Tito",
        street_number: "12",
        postal_code: "6250",
        city: "Kičevo",
        country_code: "MK",
        property_type: "APARTMENT",
        status: "ACTIVE",
        images: &[("media/demo/kicevo-front.jpg", true), ("media/demo/kicevo-kitchen.jpg", false)],
    },
    DemoListing {
        price: 74000.0,
        area: 86.0,
        total_rooms: 3.0,
        street_name: "Partizanska",
        street_number: "4a",
        postal_code: "1000",
        city: "Skopje",
        country_code: "MK",
        property_type: "APARTMENT",
        status: "ACTIVE",
        images: &[("media/demo/skopje-living.png", false)],
    },
    DemoListing {
        price: 210000.0,
        area: 240.0,
        total_rooms: 7.0,
        street_name: "Kej Makedonija",
        street_number: "1",
        postal_code: "6000",
        city: "Ohrid",
        country_code: "MK",
        property_type: "SINGLE_FAMILY_HOME",
        status: "COMING_SOON",
        images: &[],
    },
    DemoListing {
        price: 135000.0,
        area: 95.0,
        total_rooms: 3.0,
        street_name: "Knez Mihailova",
        street_number: "20",
        postal_code: "11000",
        city: "Beograd",
        country_code: "RS",
        property_type: "COMMERCIAL",
        status: "ACTIVE",
        images: &[("media/demo/beograd-shop.jpg", true)],
    },
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    // 1. Create Users
    let now = chrono::Utc::now().to_rfc3339();
    let demo_password = hash_password("demo").map_err(DbErr::Custom)?;

    for (username, email) in [("agent", "agent@example.mk"), ("buyer", "buyer@example.mk")] {
        let demo_user = user::ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(demo_password.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        user::Entity::insert(demo_user)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(user::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    // 2. Create Listings, once
    if property::Entity::find().count(db).await? > 0 {
        tracing::info!("Listings already present, skipping demo listings");
        return Ok(());
    }

    let agent = user::Entity::find()
        .filter(user::Column::Username.eq("agent"))
        .one(db)
        .await?;

    for listing in DEMO_LISTINGS {
        let saved = property::ActiveModel {
            price: Set(listing.price),
            price_currency: Set("EUR".to_owned()),
            area: Set(listing.area),
            total_area: Set(listing.area),
            total_rooms: Set(Some(listing.total_rooms)),
            heating: Set(String::new()),
            outer_walls: Set(String::new()),
            roof_type: Set(String::new()),
            description: Set(format!("Demo listing in {}", listing.city)),
            street_name: Set(listing.street_name.to_owned()),
            street_number: Set(Some(listing.street_number.to_owned())),
            postal_code: Set(listing.postal_code.to_owned()),
            city: Set(listing.city.to_owned()),
            country_code: Set(listing.country_code.to_owned()),
            property_type: Set(listing.property_type.to_owned()),
            status: Set(listing.status.to_owned()),
            owner_id: Set(agent.as_ref().map(|a| a.id)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (image, is_primary) in listing.images {
            property_image::ActiveModel {
                property_id: Set(saved.id),
                title: Set(String::new()),
                description: Set(String::new()),
                is_primary: Set(*is_primary),
                image: Set((*image).to_owned()),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    tracing::info!("Seeded {} demo listings", DEMO_LISTINGS.len());
    Ok(())
}
