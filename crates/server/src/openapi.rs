use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ManufacturerDoc { pub code: i32, pub name: Option<String> }

#[derive(ToSchema)]
pub struct DetailsDoc {
    pub manufacturer: ManufacturerDoc,
    pub model: String,
    #[schema(example = 2018)]
    pub model_year: i32,
    pub production_year: i32,
    pub mileage: i32,
    pub external_color: String,
    pub body: String,
    pub engine: String,
    pub fuel_type: String,
    pub number_of_doors: i32,
}

#[derive(ToSchema)]
pub struct LocationDoc {
    pub lat: f64,
    pub lon: f64,
}

#[derive(ToSchema)]
pub struct CarInputDoc {
    #[schema(example = "USED")]
    pub condition: String,
    pub details: DetailsDoc,
    pub location: LocationDoc,
}

#[derive(ToSchema)]
pub struct CreatePriceInputDoc {
    pub id: i64,
    #[schema(example = "USD")]
    pub currency: String,
    #[schema(value_type = String, example = "20000.00")]
    pub amount: String,
}

#[derive(ToSchema)]
pub struct UpdatePriceInputDoc {
    pub currency: String,
    #[schema(value_type = String)]
    pub amount: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list,
        crate::routes::cars::create,
        crate::routes::cars::get,
        crate::routes::cars::update,
        crate::routes::cars::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ManufacturerDoc,
            DetailsDoc,
            LocationDoc,
            CarInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cars")
    )
)]
pub struct VehiclesApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::prices::list,
        crate::routes::prices::create,
        crate::routes::prices::get,
        crate::routes::prices::update,
        crate::routes::prices::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreatePriceInputDoc,
            UpdatePriceInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "prices")
    )
)]
pub struct PricingApiDoc;
